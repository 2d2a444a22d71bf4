//! Process configuration, read once at startup from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `WARES_ADDR` | `0.0.0.0:3000` | socket address to bind |
//! | `WARES_API_KEY_HEADER` | `x-api-key` | credential header name |
//! | `WARES_API_KEY` | (required) | shared secret for gated routes |
//!
//! The credential has no default: starting without one would silently leave
//! the gated routes rejecting everything.

use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub api_key_header: String,
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("WARES_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("WARES_API_KEY"))?;
        Ok(Self {
            bind_addr: env_or("WARES_ADDR", DEFAULT_ADDR),
            api_key_header: env_or("WARES_API_KEY_HEADER", DEFAULT_API_KEY_HEADER),
            api_key,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_addr_is_a_socket_addr() {
        assert!(DEFAULT_ADDR.parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn env_or_falls_back_for_unset_vars() {
        assert_eq!(
            env_or("WARES_TEST_UNSET_SENTINEL", "fallback"),
            "fallback"
        );
    }
}
