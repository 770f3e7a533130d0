use reqwest::Url;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use super::email_client::deserialize_url;

/// Where the trigger finds the mail dispatcher function.
#[derive(Clone, Debug, Deserialize)]
pub struct DispatcherConfig {
    #[serde(deserialize_with = "deserialize_url")]
    pub url: Url,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}
