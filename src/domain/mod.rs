mod dispatch_result;
mod newsletter_kind;
mod newsletter_request;
mod subscriber;
mod subscriber_email;
mod subscriber_name;

pub use dispatch_result::{DispatchResponse, DispatchResult, ErrorResponse};
pub use newsletter_kind::NewsletterKind;
pub use newsletter_request::{DispatchPayload, NewsletterRequest};
pub use subscriber::{Recipient, Subscriber, SubscriberStatus};
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
