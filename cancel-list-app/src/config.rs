use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value {value:?}: expected true or false")]
    InvalidFlag { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub ensure_weekly_period: bool,
    pub cookie_secure: bool,
    /// Public origin such as `https://cancel.example`, without a trailing slash.
    pub site_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            run_migrations: flag(&lookup, "RUN_MIGRATIONS", true)?,
            ensure_weekly_period: flag(&lookup, "ENSURE_WEEKLY_PERIOD", false)?,
            cookie_secure: flag(&lookup, "COOKIE_SECURE", false)?,
            site_url: lookup("SITE_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

struct Flag(bool);

impl FromStr for Flag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Flag(true)),
            "0" | "false" | "no" | "off" => Ok(Flag(false)),
            _ => Err(()),
        }
    }
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key) {
        None => {
            tracing::info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(value) => value
            .parse::<Flag>()
            .map(|Flag(on)| on)
            .map_err(|_| {
                tracing::warn!("Invalid {key} value: {value}");
                ConfigError::InvalidFlag { key, value }
            }),
    }
}
