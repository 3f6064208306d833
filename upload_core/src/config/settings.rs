use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::files::{media_type_essence, ValidationConfig};
use crate::upload::{SimulationTimings, SimulatorConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub simulation: SimulationTimings,
    pub validation: ValidationConfig,
    pub websocket: WebSocketConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketConfig {
    pub event_buffer_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1024,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            permissive: false,
        }
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` in the working directory if present, then
    /// `APP__<SECTION>__<KEY>` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("validation.allowed_types")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.simulation.transfer_steps == 0 {
            return Err(ConfigError::Message(
                "Transfer steps must be greater than 0".to_string(),
            ));
        }

        if self.simulation.min_transfer_ms > self.simulation.max_transfer_ms {
            return Err(ConfigError::Message(
                "Minimum transfer time cannot exceed the maximum".to_string(),
            ));
        }

        if self.simulation.bytes_per_second == 0 {
            return Err(ConfigError::Message(
                "Simulated transfer rate must be greater than 0".to_string(),
            ));
        }

        if self.validation.max_size_bytes == 0 {
            return Err(ConfigError::Message(
                "Max file size must be greater than 0".to_string(),
            ));
        }

        if self.validation.allowed_types.is_empty() {
            return Err(ConfigError::Message(
                "At least one media type must be allowed".to_string(),
            ));
        }

        if let Some(bad) = self
            .validation
            .allowed_types
            .iter()
            .find(|t| media_type_essence(t).is_none())
        {
            return Err(ConfigError::Message(format!(
                "Allowed media type '{}' is not a valid MIME type",
                bad
            )));
        }

        if self.websocket.event_buffer_size == 0 {
            return Err(ConfigError::Message(
                "WebSocket event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            validation: self.validation.clone(),
            timings: self.simulation.clone(),
            event_capacity: self.websocket.event_buffer_size,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::locale::Locale;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.validation.max_size_bytes, 10_485_760);
        assert_eq!(config.validation.allowed_types.len(), 8);
        assert_eq!(config.simulation.transfer_steps, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.simulation.transfer_steps = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.simulation.min_transfer_ms = 6000;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.validation.allowed_types.clear();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.validation.allowed_types = ["png".to_string()].into_iter().collect();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.validation.allowed_types.insert("text/plain; charset=utf-8".to_string());
        assert!(config.validate().is_ok());

        config = AppConfig::default();
        config.websocket.event_buffer_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 4100

[simulation]
transfer_steps = 10

[validation]
max_size_bytes = 1048576
allowed_types = ["text/plain"]
locale = "en"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).expect("Should load configuration file");

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.simulation.transfer_steps, 10);
        assert_eq!(config.simulation.intake_delay_ms, 300);
        assert_eq!(config.validation.max_size_bytes, 1_048_576);
        assert_eq!(config.validation.allowed_types.len(), 1);
        assert_eq!(config.validation.locale, Locale::En);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[validation]
max_size_bytes = 1024
allowed_types = ["png", "image/png"]
"#
        )
        .unwrap();

        let result = AppConfig::load_from(file.path());
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("'png'")));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_from(Path::new("does-not-exist.toml"))
            .expect("Should load default configuration");
        assert_eq!(config.validation.max_size_bytes, 10_485_760);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simulator_config() {
        let config = AppConfig::default();
        let simulator = config.simulator_config();
        assert_eq!(simulator.event_capacity, 1024);
        assert_eq!(simulator.timings, config.simulation);
        assert_eq!(simulator.validation, config.validation);
    }
}
