use serde::{Deserialize, Serialize};

use super::{SubscriberEmail, SubscriberName};

/// Contact details of a subscriber as stored and as carried in a dispatch
/// payload. Nothing is validated until an email is addressed to it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Subscriber {
    pub email: String,
    pub name: String,
}

impl Subscriber {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A subscriber whose details are fit to address an email to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub email: SubscriberEmail,
    pub name: SubscriberName,
}

impl TryFrom<&Subscriber> for Recipient {
    type Error = String;

    fn try_from(subscriber: &Subscriber) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::try_from(subscriber.email.clone())?;
        let name = SubscriberName::try_from(subscriber.name.clone())?;
        Ok(Self { email, name })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriberStatus {
    Active,
    Inactive,
}

impl SubscriberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}
