use serde::{Deserialize, Serialize};

/// The kind of content a newsletter announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterKind {
    Article,
    Company,
}

impl NewsletterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Company => "company",
        }
    }
}

impl std::fmt::Display for NewsletterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NewsletterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(Self::Article),
            "company" => Ok(Self::Company),
            other => Err(format!(
                "{} is not a supported newsletter type. Use either 'article' or 'company'.",
                other
            )),
        }
    }
}
