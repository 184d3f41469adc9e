use motorpool_usecases::NotificationPolicy;

/// Error raised when an environment variable is absent or holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string (required).
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long a create request waits for a required notification, in
    /// seconds (default: `10`). Must stay below `request_timeout_secs`.
    pub notify_timeout_secs: u64,
    /// How long shutdown waits for background tasks, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// When set, vehicle events are POSTed here instead of the in-process bus.
    pub notify_webhook_url: Option<String>,
    /// What a failed notification does to the create request.
    pub notification_policy: NotificationPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `DATABASE_URL`          | required                   |
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `NOTIFY_TIMEOUT_SECS`   | `10`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `NOTIFY_WEBHOOK_URL`    | unset (in-process bus)     |
    /// | `NOTIFICATION_POLICY`   | `best_effort`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing {
                key: "DATABASE_URL",
            })?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_or(&lookup, "PORT", 3000, "a valid u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30, "a valid u64")?;
        let notify_timeout_secs = parse_or(&lookup, "NOTIFY_TIMEOUT_SECS", 10, "a valid u64")?;
        if notify_timeout_secs >= request_timeout_secs {
            return Err(ConfigError::Invalid {
                key: "NOTIFY_TIMEOUT_SECS",
                expected: "less than REQUEST_TIMEOUT_SECS",
                value: notify_timeout_secs.to_string(),
            });
        }
        let shutdown_timeout_secs =
            parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30, "a valid u64")?;

        let notify_webhook_url = lookup("NOTIFY_WEBHOOK_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let notification_policy = parse_or(
            &lookup,
            "NOTIFICATION_POLICY",
            NotificationPolicy::default(),
            "'best_effort' or 'required'",
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            notify_timeout_secs,
            shutdown_timeout_secs,
            notify_webhook_url,
            notification_policy,
        })
    }
}

/// Parse `key` if present, otherwise fall back to `default`.
fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
        None => Ok(default),
    }
}
