use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};

use crate::{
    configuration::DispatcherConfig,
    dispatcher::MailDispatcher,
    domain::{
        DispatchPayload, DispatchResponse, DispatchResult, ErrorResponse, NewsletterKind,
        NewsletterRequest,
    },
    subscriber_store::SubscriberStore,
    utils::error_chain_fmt,
};

/// Capability to hand a newsletter payload over to the mail dispatcher.
#[async_trait]
pub trait DispatchInvoker: Send + Sync {
    async fn invoke(&self, payload: &DispatchPayload) -> anyhow::Result<DispatchResult>;
}

#[derive(thiserror::Error)]
pub enum TriggerError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Store(anyhow::Error),
    #[error("There are no active newsletter subscribers")]
    NoSubscribers,
    #[error(transparent)]
    Dispatch(anyhow::Error),
}

impl std::fmt::Debug for TriggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Collects the active subscribers and asks the dispatcher to mail them.
pub struct NewsletterTrigger<S, D> {
    store: S,
    dispatcher: D,
}

impl<S, D> NewsletterTrigger<S, D>
where
    S: SubscriberStore,
    D: DispatchInvoker,
{
    pub fn new(store: S, dispatcher: D) -> Self {
        Self { store, dispatcher }
    }

    #[tracing::instrument(
        name = "Triggering a newsletter",
        skip_all,
        fields(newsletter_type = %kind, email_subject = %title)
    )]
    pub async fn send_newsletter(
        &self,
        title: String,
        content: String,
        kind: NewsletterKind,
    ) -> Result<DispatchResult, TriggerError> {
        let request =
            NewsletterRequest::parse(title, content, kind).map_err(TriggerError::InvalidRequest)?;
        let subscribers = self
            .store
            .active_subscribers()
            .await
            .map_err(TriggerError::Store)?;
        if subscribers.is_empty() {
            return Err(TriggerError::NoSubscribers);
        }
        let payload = DispatchPayload::new(&request, subscribers);
        self.dispatcher
            .invoke(&payload)
            .await
            .map_err(TriggerError::Dispatch)
    }
}

/// Invokes a mail dispatcher hosted behind HTTP.
#[derive(Clone, Debug)]
pub struct DispatcherClient {
    http_client: reqwest::Client,
    url: Url,
    api_key: Option<Secret<String>>,
}

impl DispatcherClient {
    pub fn new(config: DispatcherConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_milliseconds))
            .build()?;
        Ok(Self {
            http_client,
            url: config.url,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl DispatchInvoker for DispatcherClient {
    #[tracing::instrument(name = "Invoking the mail dispatcher", skip_all)]
    async fn invoke(&self, payload: &DispatchPayload) -> anyhow::Result<DispatchResult> {
        let mut request = self.http_client.post(self.url.clone()).json(payload);
        if let Some(api_key) = &self.api_key {
            request = request
                .bearer_auth(api_key.expose_secret())
                .header("apikey", api_key.expose_secret());
        }
        let response = request
            .send()
            .await
            .context("Failed to reach the mail dispatcher")?;
        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<DispatchResponse>()
                .await
                .context("The mail dispatcher answered with an unexpected body")?;
            return Ok(body.result);
        }
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        Err(anyhow!(message)).with_context(|| format!("The mail dispatcher failed with status {status}"))
    }
}

/// Runs the dispatcher in-process.
#[async_trait]
impl DispatchInvoker for MailDispatcher {
    async fn invoke(&self, payload: &DispatchPayload) -> anyhow::Result<DispatchResult> {
        let (request, subscribers) = payload.clone().into_parts().map_err(|e| anyhow!(e))?;
        Ok(self.dispatch(&request, &subscribers).await)
    }
}
