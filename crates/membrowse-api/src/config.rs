//! Server settings from the environment.

use std::net::SocketAddr;

const DEFAULT_LISTEN: &str = "127.0.0.1:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid MEMBROWSE_LISTEN {value:?}: {source}")]
    Listen {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup("MEMBROWSE_LISTEN")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = value
            .parse()
            .map_err(|source| ConfigError::Listen { value, source })?;
        Ok(Self { listen })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_address() {
        let cfg = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.listen.to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn invalid_listen_address() {
        let err = ServerConfig::from_lookup(|_| Some("not-an-addr".to_string())).unwrap_err();
        assert!(err.to_string().starts_with("invalid MEMBROWSE_LISTEN \"not-an-addr\""));
    }
}
