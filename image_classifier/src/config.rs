use pipeline_payload::config::{deserialize_log_level, LogLevel};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    pub endpoint: EndpointConfig,
}

/// The hosted model every invocation is sent to. Fixed per deployment.
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    pub name: String,
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Endpoint name must not be empty".to_string());
        }
        Ok(())
    }
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config: Config = pipeline_payload::config::get_configuration("CLASSIFIER")?;

    if let Err(e) = config.endpoint.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Err(config::ConfigError::Message(e));
    }

    Ok(config)
}
