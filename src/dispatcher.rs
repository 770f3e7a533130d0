use std::sync::Arc;

use futures::future::join_all;

use crate::{
    domain::{DispatchResult, NewsletterRequest, Recipient, Subscriber},
    email_client::EmailSender,
    template,
};

/// Renders a newsletter for every subscriber and hands each email to the
/// provider.
#[derive(Clone)]
pub struct MailDispatcher {
    email_sender: Arc<dyn EmailSender>,
    site_url: String,
}

impl MailDispatcher {
    pub fn new(email_sender: Arc<dyn EmailSender>, site_url: impl Into<String>) -> Self {
        Self {
            email_sender,
            site_url: site_url.into(),
        }
    }

    /// Sends to every subscriber concurrently and waits for every send to
    /// settle. Individual failures, including subscribers whose details cannot
    /// be addressed, are counted, never returned.
    #[tracing::instrument(
        name = "Dispatching a newsletter",
        skip_all,
        fields(
            newsletter_type = %request.kind(),
            email_subject = %request.title(),
            subscribers = subscribers.len(),
        )
    )]
    pub async fn dispatch(
        &self,
        request: &NewsletterRequest,
        subscribers: &[Subscriber],
    ) -> DispatchResult {
        let deliveries = subscribers
            .iter()
            .map(|subscriber| self.deliver(request, subscriber));
        let outcomes = join_all(deliveries).await;

        let sent = outcomes.iter().filter(|delivered| **delivered).count() as u64;
        let result = DispatchResult {
            sent,
            failed: outcomes.len() as u64 - sent,
        };
        tracing::info!(
            sent = result.sent,
            failed = result.failed,
            "Newsletter sent: {} successful, {} failed",
            result.sent,
            result.failed,
        );
        result
    }

    async fn deliver(&self, request: &NewsletterRequest, subscriber: &Subscriber) -> bool {
        let recipient = match Recipient::try_from(subscriber) {
            Ok(recipient) => recipient,
            Err(e) => {
                tracing::warn!(
                    error.message = %e,
                    subscriber_email = %subscriber.email,
                    "Skipping a subscriber with invalid contact details",
                );
                return false;
            }
        };
        let email = template::render(request, &recipient, &self.site_url);
        match self
            .email_sender
            .send_email(&recipient.email, &email.subject, &email.html)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    subscriber_email = %subscriber.email,
                    "Failed to deliver newsletter to a subscriber",
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for MailDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailDispatcher")
            .field("site_url", &self.site_url)
            .finish_non_exhaustive()
    }
}
