//! Service configuration from environment variables.
//! Used by: main, state.

use std::fmt;

use chrono::Duration;

use crate::error::{Error, Result};

pub const SECRET_VAR: &str = "JWTMINT_SECRET";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const COOKIE_VAR: &str = "JWTMINT_COOKIE";
pub const TTL_VAR: &str = "JWTMINT_TTL_SECONDS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_COOKIE: &str = "token";

#[derive(Clone)]
pub struct Config {
    pub secret: Vec<u8>,
    pub bind_addr: String,
    pub cookie_name: String,
    /// Lifetime stamped as `exp` on issued tokens that carry none.
    pub ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup(SECRET_VAR)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config(format!("{} must be set", SECRET_VAR)))?;

        let bind_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let cookie_name = lookup(COOKIE_VAR).unwrap_or_else(|| DEFAULT_COOKIE.into());
        if cookie_name.is_empty()
            || !cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::Config(format!(
                "{} must be 1+ alphanumeric/underscore/dash chars",
                COOKIE_VAR
            )));
        }

        let ttl = match lookup(TTL_VAR) {
            None => None,
            Some(raw) => {
                let seconds: i64 = raw.parse().ok().filter(|s| *s > 0).ok_or_else(|| {
                    Error::Config(format!("{} must be a positive integer", TTL_VAR))
                })?;
                Some(Duration::seconds(seconds))
            }
        };

        Ok(Self {
            secret: secret.into_bytes(),
            bind_addr,
            cookie_name,
            ttl,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("cookie_name", &self.cookie_name)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_applied() -> Result<()> {
        let config = config(&[(SECRET_VAR, "s3cret")])?;
        assert_eq!(config.secret, b"s3cret");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.cookie_name, "token");
        assert!(config.ttl.is_none());
        Ok(())
    }

    #[test]
    fn missing_secret_rejected() {
        assert!(matches!(config(&[]), Err(Error::Config(_))));
        assert!(matches!(config(&[(SECRET_VAR, "")]), Err(Error::Config(_))));
    }

    #[test]
    fn overrides_applied() -> Result<()> {
        let config = config(&[
            (SECRET_VAR, "k"),
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (COOKIE_VAR, "session_jwt"),
            (TTL_VAR, "900"),
        ])?;
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.cookie_name, "session_jwt");
        assert_eq!(config.ttl, Some(Duration::seconds(900)));
        Ok(())
    }

    #[test]
    fn invalid_ttl_rejected() {
        assert!(matches!(config(&[(SECRET_VAR, "k"), (TTL_VAR, "soon")]), Err(Error::Config(_))));
        assert!(matches!(config(&[(SECRET_VAR, "k"), (TTL_VAR, "0")]), Err(Error::Config(_))));
    }

    #[test]
    fn invalid_cookie_name_rejected() {
        let result = config(&[(SECRET_VAR, "k"), (COOKIE_VAR, "a;b")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn debug_redacts_secret() -> Result<()> {
        let config = config(&[(SECRET_VAR, "hunter2")])?;
        assert!(!format!("{:?}", config).contains("hunter2"));
        Ok(())
    }
}
