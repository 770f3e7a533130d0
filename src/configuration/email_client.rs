use std::time::Duration;

use reqwest::Url;
use secrecy::Secret;
use serde::{de, Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::SubscriberEmail;

#[derive(Clone, Debug, Deserialize)]
pub struct EmailClientConfig {
    #[serde(deserialize_with = "deserialize_url")]
    pub base_url: Url,
    pub sender_email: SubscriberEmail,
    pub sender_name: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientConfig {
    /// The `From` header value, e.g. `Newsletter <newsletter@example.com>`.
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender_email)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

pub(super) fn deserialize_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    Url::parse(&String::deserialize(deserializer)?).map_err(de::Error::custom)
}
