use core_config::{
    ConfigError, FromEnv, env_or_default, env_parse,
    logging::{LogLevel, LoggingConfig},
    server::ServerConfig,
};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Display name of the platform instance
    pub instance_name: String,
    /// Hourly rate of the built-in Kubernetes Pod resource
    pub pod_price_per_hour: f64,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let logging = LoggingConfig::from_env()?;

        let instance_name = env_or_default("INSTANCE_NAME", "platform");
        if instance_name.trim().is_empty() {
            return Err(ConfigError::invalid("INSTANCE_NAME", "must not be empty").into());
        }

        let pod_price_per_hour: f64 = env_parse("POD_PRICE_PER_HOUR", 0.0)?;
        if !pod_price_per_hour.is_finite() || pod_price_per_hour < 0.0 {
            return Err(ConfigError::invalid(
                "POD_PRICE_PER_HOUR",
                "must be a non-negative number",
            )
            .into());
        }

        Ok(Self {
            environment,
            server,
            logging,
            instance_name,
            pod_price_per_hour,
        })
    }
}

/// Command-line settings that take precedence over the environment
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
}

impl Config {
    /// Apply command-line overrides and re-validate the server settings
    pub fn with_overrides(mut self, overrides: Overrides) -> eyre::Result<Self> {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if overrides.debug {
            self.logging.level = LogLevel::Debug;
        }
        self.server.validate()?;

        Ok(self)
    }
}
