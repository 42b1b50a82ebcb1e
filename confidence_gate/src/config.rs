use pipeline_payload::config::{deserialize_log_level, LogLevel};
use serde::Deserialize;

/// The confidence threshold is not configurable, see `THRESHOLD`.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    pipeline_payload::config::get_configuration("GATE")
}
