use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Server configuration for the HTTP API
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longest time to receive a request body
    pub read_timeout: Duration,
    /// Longest time to produce a response
    pub write_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid(
                "PORT",
                "must be between 1 and 65535",
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "SERVER_READ_TIMEOUT_SECS",
                "must be greater than zero",
            ));
        }
        if self.write_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "SERVER_WRITE_TIMEOUT_SECS",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8080
    /// - SERVER_READ_TIMEOUT_SECS / SERVER_WRITE_TIMEOUT_SECS: default 15
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_or_default("PORT", "8080")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "PORT".to_string(),
                details: format!("{}", e),
            })?;

        let config = Self {
            host,
            port,
            read_timeout: Duration::from_secs(env_parse("SERVER_READ_TIMEOUT_SECS", 15)?),
            write_timeout: Duration::from_secs(env_parse("SERVER_WRITE_TIMEOUT_SECS", 15)?),
        };
        config.validate()?;

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            read_timeout: Duration::from_secs(15),
            write_timeout: Duration::from_secs(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "HOST",
        "PORT",
        "SERVER_READ_TIMEOUT_SECS",
        "SERVER_WRITE_TIMEOUT_SECS",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars(unset_all(), || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8080);
            assert_eq!(config.address(), "0.0.0.0:8080");
            assert_eq!(config.read_timeout, Duration::from_secs(15));
            assert_eq!(config.write_timeout, Duration::from_secs(15));
        });
    }

    #[test]
    fn test_server_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("9090")),
                ("SERVER_READ_TIMEOUT_SECS", Some("5")),
                ("SERVER_WRITE_TIMEOUT_SECS", Some("10")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:9090");
                assert_eq!(config.read_timeout, Duration::from_secs(5));
                assert_eq!(config.write_timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_server_config_from_env_invalid_port() {
        temp_env::with_var("PORT", Some("not_a_number"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_from_env_port_out_of_range() {
        temp_env::with_var("PORT", Some("99999"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_rejects_port_zero() {
        let config = ServerConfig::new("localhost".to_string(), 0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_server_config_rejects_zero_read_timeout() {
        temp_env::with_var("SERVER_READ_TIMEOUT_SECS", Some("0"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SERVER_READ_TIMEOUT_SECS"));
        });
    }
}
