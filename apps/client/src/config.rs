use std::time::Duration;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    /// Permission strings granted to the token holder, e.g. `POST /chat-message`.
    /// Empty means "unknown": the server's 401/403 is the only guard.
    pub permissions: Vec<String>,
    pub request_timeout: Duration,
    pub notification_poll_interval: Duration,
    pub payment_callback_port: u16,
    pub payment_callback_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    /// `api_url` and `access_token` come from the command line and take
    /// precedence over the environment.
    pub fn from_env(api_url: Option<String>, access_token: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = match api_url {
            Some(url) => url,
            None => require_env("TALENTBRIDGE_API_URL")?,
        };

        Ok(Config {
            api_url,
            access_token: access_token.or_else(|| optional_env("TALENTBRIDGE_ACCESS_TOKEN")),
            permissions: optional_env("TALENTBRIDGE_PERMISSIONS")
                .map(|raw| parse_permissions(&raw))
                .unwrap_or_default(),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)?),
            notification_poll_interval: Duration::from_secs(parse_env(
                "NOTIFICATION_POLL_SECS",
                30,
            )?),
            payment_callback_port: parse_env("PAYMENT_CALLBACK_PORT", 3000)?,
            payment_callback_timeout: Duration::from_secs(parse_env(
                "PAYMENT_CALLBACK_TIMEOUT_SECS",
                600,
            )?),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// True when the permission list is unknown (empty) or contains `permission`.
    pub fn allows(&self, permission: &str) -> bool {
        self.permissions.is_empty() || self.permissions.iter().any(|p| p == permission)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_permissions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(permissions: &[&str]) -> Config {
        Config {
            api_url: "http://localhost:8080/api".to_string(),
            access_token: None,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            request_timeout: Duration::from_secs(30),
            notification_poll_interval: Duration::from_secs(30),
            payment_callback_port: 3000,
            payment_callback_timeout: Duration::from_secs(600),
            rust_log: "warn".to_string(),
        }
    }

    #[test]
    fn test_parse_permissions_trims_and_skips_empty() {
        let parsed = parse_permissions(" POST /chat-message , ,GET /jobs");
        assert_eq!(parsed, vec!["POST /chat-message", "GET /jobs"]);
    }

    #[test]
    fn test_empty_permission_list_allows_everything() {
        assert!(config_with(&[]).allows("POST /chat-message"));
    }

    #[test]
    fn test_permission_list_is_exact_match() {
        let config = config_with(&["GET /jobs"]);
        assert!(config.allows("GET /jobs"));
        assert!(!config.allows("POST /chat-message"));
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let secs: u64 = parse_env("TALENTBRIDGE_UNSET_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(secs, 30);
    }
}
