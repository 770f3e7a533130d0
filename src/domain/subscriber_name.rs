/// Display name used to greet a subscriber. Any non-blank text is accepted;
/// it is escaped when placed into markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberName(String);

impl std::fmt::Display for SubscriberName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for SubscriberName {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            Err("A subscriber name must not be empty".into())
        } else {
            Ok(Self(value))
        }
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
