use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};

use crate::auth::jwt::JwtConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone)]
pub enum CorsOrigins {
    /// `*`: echo back whatever origin the request carries.
    Mirror,
    List(Vec<HeaderValue>),
}

/// Request headers allowed by the CORS layer.
#[derive(Debug, Clone)]
pub enum CorsHeaders {
    /// `*`: echo back the preflight's requested headers.
    Mirror,
    List(Vec<HeaderName>),
}

/// Log output format for the `fmt` subscriber layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Periods of the background database monitor.
#[derive(Debug, Clone, Copy)]
pub struct MonitorIntervals {
    /// How often connectivity is probed.
    pub probe: Duration,
    /// How often connection statistics are logged.
    pub stats: Duration,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` and `JWT_SECRET` has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    pub cors_origins: CorsOrigins,
    pub cors_headers: CorsHeaders,
    pub cors_max_age_secs: u64,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub monitor: MonitorIntervals,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default       |
    /// |----------------------------|---------------|
    /// | `DATABASE_URL`             | **required**  |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`          |
    /// | `HOST`                     | `0.0.0.0`     |
    /// | `PORT`                     | `8080`        |
    /// | `CORS_ALLOWED_ORIGINS`     | `*`           |
    /// | `CORS_ALLOWED_HEADERS`     | `*`           |
    /// | `CORS_MAX_AGE_SECS`        | `3600`        |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`          |
    /// | `JWT_SECRET`               | **required**  |
    /// | `JWT_EXPIRATION_SECS`      | `604800`      |
    /// | `DB_MONITOR_INTERVAL_SECS` | `3600`        |
    /// | `DB_STATS_INTERVAL_SECS`   | `86400`       |
    /// | `LOG_FORMAT`               | `text`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_url = env.required("DATABASE_URL")?;
        let database_max_connections = env.parsed("DATABASE_MAX_CONNECTIONS", 20)?;

        let host = env.get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = env.parsed("PORT", 8080)?;

        let cors_origins = parse_cors_origins(&env.get("CORS_ALLOWED_ORIGINS").unwrap_or_default())?;
        let cors_headers = parse_cors_headers(&env.get("CORS_ALLOWED_HEADERS").unwrap_or_default())?;
        let cors_max_age_secs = env.parsed("CORS_MAX_AGE_SECS", 3600)?;

        let request_timeout_secs = env.parsed("REQUEST_TIMEOUT_SECS", 30)?;

        let jwt = JwtConfig {
            secret: env.required("JWT_SECRET")?,
            expiration_secs: env.parsed("JWT_EXPIRATION_SECS", JwtConfig::DEFAULT_EXPIRATION_SECS)?,
        };
        if !(1..=JwtConfig::MAX_EXPIRATION_SECS).contains(&jwt.expiration_secs) {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRATION_SECS",
                value: jwt.expiration_secs.to_string(),
                reason: format!("must be between 1 and {}", JwtConfig::MAX_EXPIRATION_SECS),
            });
        }

        let monitor = MonitorIntervals {
            probe: Duration::from_secs(env.positive("DB_MONITOR_INTERVAL_SECS", 3600)?),
            stats: Duration::from_secs(env.positive("DB_STATS_INTERVAL_SECS", 86_400)?),
        };

        let log_format = match env.get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'text' or 'json'".into(),
                })
            }
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            cors_origins,
            cors_headers,
            cors_max_age_secs,
            request_timeout_secs,
            jwt,
            monitor,
            log_format,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value, treating blank as unset.
    fn get(&self, var: &str) -> Option<String> {
        (self.0)(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.get(var).ok_or(ConfigError::Missing(var))
    }

    fn parsed<T>(&self, var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(var) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
        }
    }

    fn positive(&self, var: &'static str, default: u64) -> Result<u64, ConfigError> {
        let value = self.parsed(var, default)?;
        if value == 0 {
            return Err(ConfigError::Invalid {
                var,
                value: "0".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(value)
    }
}

/// Parse a comma-separated origin list; blank or `*` means mirror.
fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let items = split_list(raw);
    if items.is_empty() || items.contains(&"*") {
        return Ok(CorsOrigins::Mirror);
    }
    items
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                var: "CORS_ALLOWED_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

/// Parse a comma-separated header list; blank or `*` means mirror.
fn parse_cors_headers(raw: &str) -> Result<CorsHeaders, ConfigError> {
    let items = split_list(raw);
    if items.is_empty() || items.contains(&"*") {
        return Ok(CorsHeaders::Mirror);
    }
    items
        .into_iter()
        .map(|name| {
            HeaderName::from_str(name).map_err(|e| ConfigError::Invalid {
                var: "CORS_ALLOWED_HEADERS",
                value: name.to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsHeaders::List)
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
