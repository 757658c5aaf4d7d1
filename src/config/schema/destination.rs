use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Fixed ingest endpoint the secret stream key is appended to
    #[serde(default = "default_base")]
    pub base: String,
    /// File read by the streaming service to find its output URI
    #[serde(default = "default_uri_file")]
    pub uri_file: String,
    /// Command run after the URI changes; empty disables the reload
    #[serde(default = "default_reload_command")]
    pub reload_command: Vec<String>,
}

fn default_base() -> String {
    "rtmp://a.rtmp.youtube.com/live2".into()
}

fn default_uri_file() -> String {
    "/etc/streamdelay/out_uri.txt".into()
}

fn default_reload_command() -> Vec<String> {
    ["sudo", "/bin/systemctl", "restart", "streamdelay.service"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl DestinationConfig {
    pub fn uri_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.uri_file).as_ref())
    }
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            uri_file: default_uri_file(),
            reload_command: default_reload_command(),
        }
    }
}
