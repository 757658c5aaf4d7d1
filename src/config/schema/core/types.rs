use super::super::{
    CooldownConfig, DestinationConfig, GatewayConfig, IngestConfig, UpstreamConfig,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub cooldown: CooldownConfig,

    #[serde(default)]
    pub destination: DestinationConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    /// Reject settings the components cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cooldown.duration_secs == 0 {
            return Err(ConfigError::Validation(
                "cooldown.duration_secs must be greater than 0".into(),
            ));
        }
        if self.cooldown.state_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cooldown.state_file must not be empty".into(),
            ));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "upstream.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upstream.base_url must not be empty".into(),
            ));
        }
        if self.destination.base.trim().trim_end_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "destination.base must not be empty".into(),
            ));
        }
        if self.destination.uri_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "destination.uri_file must not be empty".into(),
            ));
        }
        Ok(())
    }
}
