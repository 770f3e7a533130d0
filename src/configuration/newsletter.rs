use serde::Deserialize;

pub const DEFAULT_SITE_URL: &str = "https://yoursite.com";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewsletterConfig {
    #[serde(default)]
    pub site_url: Option<String>,
}

impl NewsletterConfig {
    /// Target of the call-to-action link in every newsletter email.
    pub fn site_url(&self) -> &str {
        self.site_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_SITE_URL)
    }
}
