//! Server configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! `main` loads `.env` (if present) and then calls [`ServerConfig::from_env`].
//! Parsing itself goes through [`ServerConfig::from_vars`], which takes a
//! lookup function so tests never touch the process environment.

use axum::http::HeaderValue;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_COOKIE_NAME: &str = "token";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes")]
    WeakSecret,
    #[error("COOKIE_SAME_SITE=none requires COOKIE_SECURE=true")]
    SameSiteNoneRequiresSecure,
}

/// `SameSite` attribute applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSameSite {
    /// Same-site requests and top-level navigations only.
    Lax,
    /// Sent on cross-origin requests; browsers require `Secure` as well.
    None,
}

/// Session token and cookie settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub ttl_secs: i64,
    pub cookie_secure: bool,
    pub same_site: CookieSameSite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub session: SessionConfig,
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    /// - `SESSION_SECRET` (at least 32 bytes)
    ///
    /// Optional:
    /// - `PORT`: default 5000
    /// - `SESSION_COOKIE_NAME`: default `token`
    /// - `SESSION_TTL_SECS`: default 86400
    /// - `COOKIE_SECURE`: boolean, default false
    /// - `COOKIE_SAME_SITE`: `lax` (default) or `none`
    /// - `CORS_ORIGINS`: comma-separated origins, default `http://localhost:3000`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let secret = get("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }

        let cookie_name = get("SESSION_COOKIE_NAME")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_owned());

        let ttl_secs = parse_or("SESSION_TTL_SECS", get("SESSION_TTL_SECS"), DEFAULT_SESSION_TTL_SECS)?;
        if ttl_secs <= 0 {
            return Err(ConfigError::Invalid { var: "SESSION_TTL_SECS", value: ttl_secs.to_string() });
        }

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => false,
        };
        let same_site = parse_same_site(get("COOKIE_SAME_SITE").as_deref())?;
        if same_site == CookieSameSite::None && !cookie_secure {
            return Err(ConfigError::SameSiteNoneRequiresSecure);
        }

        let cors_origins = parse_origins(get("CORS_ORIGINS").as_deref().unwrap_or(DEFAULT_CORS_ORIGINS))?;

        Ok(Self {
            database_url,
            port,
            session: SessionConfig { secret, cookie_name, ttl_secs, cookie_secure, same_site },
            cors_origins,
        })
    }
}

/// Parse a human boolean (`1/true/yes/on`, `0/false/no/off`), case-insensitive.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn parse_same_site(raw: Option<&str>) -> Result<CookieSameSite, ConfigError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("lax") => Ok(CookieSameSite::Lax),
        Some("none") => Ok(CookieSameSite::None),
        Some(other) => Err(ConfigError::Invalid { var: "COOKIE_SAME_SITE", value: other.to_owned() }),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::Invalid { var: "CORS_ORIGINS", value: origin.to_owned() });
            }
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::Invalid { var: "CORS_ORIGINS", value: origin.to_owned() })
        })
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
