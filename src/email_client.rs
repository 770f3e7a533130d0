use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::{configuration::EmailClientConfig, domain::SubscriberEmail};

/// Capability to hand a single HTML email to a delivery provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(
        &self,
        recipient: &SubscriberEmail,
        subject: &str,
        html_content: &str,
    ) -> anyhow::Result<()>;
}

/// Client for a Resend-compatible transactional email API.
#[derive(Clone, Debug)]
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: Url,
    sender: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(config: EmailClientConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http_client,
            sender: config.sender(),
            base_url: config.base_url,
            authorization_token: config.authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip_all,
        fields(recipient = %recipient, subject = %subject)
    )]
    pub async fn send(
        &self,
        recipient: &SubscriberEmail,
        subject: &str,
        html_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = self.emails_endpoint();
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: [recipient.as_ref()],
            subject,
            html: html_content,
        };
        self.http_client
            .post(url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()
            .map(|_| ())
    }

    fn emails_endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map(|mut segments| {
                segments.pop_if_empty().push("emails");
            })
            .ok();
        url
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    async fn send_email(
        &self,
        recipient: &SubscriberEmail,
        subject: &str,
        html_content: &str,
    ) -> anyhow::Result<()> {
        self.send(recipient, subject, html_content)
            .await
            .map_err(anyhow::Error::from)
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}
