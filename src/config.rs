use anyhow::Context;
use std::env;

/// Origins allowed to make cross-origin requests when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "http://localhost:1234",
    "https://movies.com",
];

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("PORT").ok().as_deref(),
            env::var("ALLOWED_ORIGINS").ok().as_deref(),
        )
    }

    fn from_vars(port: Option<&str>, origins: Option<&str>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(port) = port {
            config.port = port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?;
        }

        // empty entries are dropped so "a.com," doesn't allow the empty origin
        if let Some(origins) = origins {
            config.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:8080",
                "http://localhost:1234",
                "https://movies.com"
            ]
        );
    }

    #[test]
    fn port_override() {
        let config = Config::from_vars(Some("8081"), None).unwrap();
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(Config::from_vars(Some("not-a-port"), None).is_err());
        assert!(Config::from_vars(Some("70000"), None).is_err());
    }

    #[test]
    fn origins_override_is_trimmed() {
        let config = Config::from_vars(None, Some(" https://a.com , https://b.com,")).unwrap();
        assert_eq!(config.allowed_origins, vec!["https://a.com", "https://b.com"]);
    }
}
