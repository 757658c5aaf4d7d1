use serde::{Deserialize, Serialize};

/// Connection settings for the delay engine's status API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the status service (default: `http://127.0.0.1:7070`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Shared key sent as the `key` query parameter
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Per-request timeout in seconds (default: 3)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:7070".into()
}

fn default_api_key() -> String {
    "lan-key".into()
}

fn default_timeout_secs() -> u64 {
    3
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
