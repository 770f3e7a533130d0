use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

/// Largest request body the dispatcher accepts when none is configured.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 256 * 1024 * 1024;

#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Upper bound on a dispatch payload, subscriber list included.
    #[serde(
        default = "default_max_payload_bytes",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub max_payload_bytes: usize,
}

fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}
