use pipeline_payload::config::{deserialize_log_level, LogLevel};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    #[serde(default)]
    pub scratch: ScratchConfig,
}

/// Where downloaded objects are staged before being encoded.
#[derive(Debug, Deserialize, Clone)]
pub struct ScratchConfig {
    #[serde(default = "default_scratch_dir")]
    pub dir: PathBuf,
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from("/tmp")
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            dir: default_scratch_dir(),
        }
    }
}

impl ScratchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.dir.is_dir() {
            return Err(format!("Scratch directory not found: {:?}", self.dir));
        }
        Ok(())
    }
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config: Config = pipeline_payload::config::get_configuration("FETCHER")?;

    if let Err(e) = config.scratch.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Err(config::ConfigError::Message(e));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?
            .try_deserialize::<Config>()
    }

    #[test]
    fn test_scratch_defaults_to_tmp() {
        let config = parse("log_level: info").unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.scratch.dir, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_scratch_dir_override() {
        let config = parse("log_level: debug\nscratch:\n  dir: /var/scratch\n").unwrap();

        assert_eq!(config.scratch.dir, PathBuf::from("/var/scratch"));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(parse("log_level: verbose").is_err());
    }

    #[test]
    fn test_missing_scratch_dir_fails_validation() {
        let scratch = ScratchConfig {
            dir: PathBuf::from("/definitely/not/here"),
        };
        assert!(scratch.validate().is_err());

        let scratch = ScratchConfig {
            dir: std::env::temp_dir(),
        };
        assert!(scratch.validate().is_ok());
    }
}
