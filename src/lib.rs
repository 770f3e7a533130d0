pub mod configuration;
pub mod dispatcher;
pub mod domain;
pub mod email_client;
mod routes;
mod server;
pub mod subscriber_store;
pub mod telemetry;
pub mod template;
pub mod trigger;
mod utils;

pub use configuration::Config;
pub use dispatcher::MailDispatcher;
pub use email_client::{EmailClient, EmailSender};
pub use server::{Server, CORS_ALLOW_HEADERS};
pub use subscriber_store::{PgSubscriberStore, SubscriberStore};
pub use trigger::{DispatchInvoker, DispatcherClient, NewsletterTrigger, TriggerError};

pub type Database = sqlx::Postgres;
pub type DbPool = sqlx::Pool<Database>;
