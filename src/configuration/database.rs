use std::str::FromStr;

use secrecy::{ExposeSecret, Secret};
use serde::{de, Deserialize, Deserializer};
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "url")] // reads from APP_DATABASE__URL
    pub options: DbConnectionOptions,
}

#[derive(Clone, Debug)]
pub struct DbConnectionOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub database: String,
}

impl DatabaseConfig {
    pub fn with_default_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.options.host)
            .port(self.options.port)
            .username(&self.options.username)
            .password(self.options.password.expose_secret())
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.with_default_db().database(&self.options.database)
    }
}

impl FromStr for DbConnectionOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use regex::Regex;
        let rg = Regex::new(r"^postgres(?:ql)?://(.+):(.+)@(.+):(\d+)/(.+)$")
            .map_err(|e| e.to_string())?;
        let captures = rg
            .captures(s)
            .ok_or("Database URL did not match the expected format.")?;
        let capture = |i: usize| captures.get(i).map(|m| m.as_str().to_owned()).unwrap_or_default();
        Ok(DbConnectionOptions {
            username: capture(1),
            password: Secret::new(capture(2)),
            host: capture(3),
            port: capture(4).parse().map_err(|_| "Invalid port value.")?,
            database: capture(5),
        })
    }
}

impl<'de> Deserialize<'de> for DbConnectionOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let url = &String::deserialize(deserializer)?;
        Self::from_str(url).map_err(de::Error::custom)
    }
}
