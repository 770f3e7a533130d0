use serde::{Deserialize, Serialize};

use super::{NewsletterKind, Subscriber};

/// A newsletter issue about to be sent.
///
/// Title and content are guaranteed to be non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsletterRequest {
    title: String,
    content: String,
    kind: NewsletterKind,
}

impl NewsletterRequest {
    pub fn parse(title: String, content: String, kind: NewsletterKind) -> Result<Self, String> {
        if title.trim().is_empty() {
            return Err("The newsletter title must not be empty".into());
        }
        if content.trim().is_empty() {
            return Err("The newsletter content must not be empty".into());
        }
        Ok(Self {
            title,
            content,
            kind,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> NewsletterKind {
        self.kind
    }
}

/// Body of a dispatcher invocation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DispatchPayload {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NewsletterKind,
    pub subscribers: Vec<Subscriber>,
}

impl DispatchPayload {
    pub fn new(request: &NewsletterRequest, subscribers: Vec<Subscriber>) -> Self {
        Self {
            title: request.title.clone(),
            content: request.content.clone(),
            kind: request.kind,
            subscribers,
        }
    }

    pub fn into_parts(self) -> Result<(NewsletterRequest, Vec<Subscriber>), String> {
        let request = NewsletterRequest::parse(self.title, self.content, self.kind)?;
        Ok((request, self.subscribers))
    }
}
