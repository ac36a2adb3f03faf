use std::time::Duration;

use crate::auth::session::SessionContext;
use crate::errors::ConfigError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "./static";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub bind: String,
    pub username: String,
    pub is_superuser: bool,
    /// Value of the upstream `session` cookie, forwarded on every API call.
    pub session_cookie: Option<String>,
    /// Used to log in when no session cookie is configured.
    pub password: Option<String>,
    pub timeout: Option<Duration>,
    pub static_dir: String,
}

impl AppConfig {
    /// Load from the process environment (call `dotenvy::dotenv()` first).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = get("MAKECHAT_USERNAME").ok_or(ConfigError::Missing("MAKECHAT_USERNAME"))?;
        let is_superuser = match get("MAKECHAT_SUPERUSER") {
            Some(v) => parse_bool("MAKECHAT_SUPERUSER", &v)?,
            None => false,
        };
        let timeout = match get("MAKECHAT_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: "MAKECHAT_TIMEOUT_SECS",
                    value: v.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url: get("MAKECHAT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            bind: get("DASHBOARD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            username: username.trim().to_string(),
            is_superuser,
            session_cookie: get("MAKECHAT_SESSION"),
            password: get("MAKECHAT_PASSWORD"),
            timeout,
            static_dir: get("DASHBOARD_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    pub fn session_context(&self) -> SessionContext {
        SessionContext::new(self.username.clone(), self.is_superuser)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: value.to_string() }),
    }
}
