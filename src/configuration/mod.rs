mod application;
mod database;
mod dispatcher;
mod email_client;
mod environment;
mod newsletter;

pub use application::{ApplicationConfig, DEFAULT_MAX_PAYLOAD_BYTES};
pub use database::{DatabaseConfig, DbConnectionOptions};
pub use dispatcher::DispatcherConfig;
pub use email_client::EmailClientConfig;
use environment::Environment;
pub use newsletter::{NewsletterConfig, DEFAULT_SITE_URL};

use config::ConfigError;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub application: ApplicationConfig,
    pub database: DatabaseConfig,
    pub email_client: EmailClientConfig,
    #[serde(default)]
    pub newsletter: NewsletterConfig,
    pub dispatcher: DispatcherConfig,
}

impl Config {
    /// Layers `config/base.yaml`, `config/<APP_ENVIRONMENT>.yaml` and `APP_*`
    /// environment variables. `RESEND_API_KEY` and `SITE_URL` take precedence
    /// over everything else.
    pub fn init() -> Result<Self, ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {e}")))?;
        let config_directory = base_path.join("config");
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;
        let config_file = format!("{}.yaml", environment.as_str());
        config::Config::builder()
            .add_source(config::File::from(config_directory.join("base.yaml")))
            .add_source(config::File::from(config_directory.join(config_file)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option(
                "email_client.authorization_token",
                std::env::var("RESEND_API_KEY").ok(),
            )?
            .set_override_option("newsletter.site_url", std::env::var("SITE_URL").ok())?
            .build()?
            .try_deserialize::<Self>()
    }
}
