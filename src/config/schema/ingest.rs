use serde::{Deserialize, Serialize};

/// Where encoders (OBS and friends) push the source feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Host advertised to encoders; no hint is shown when unset
    #[serde(default)]
    pub public_host: Option<String>,
    #[serde(default = "default_srt_port")]
    pub srt_port: u16,
    /// SRT latency in microseconds
    #[serde(default = "default_latency_us")]
    pub latency_us: u64,
}

fn default_srt_port() -> u16 {
    9000
}

fn default_latency_us() -> u64 {
    200_000
}

impl IngestConfig {
    /// SRT caller URI for the configured host, if any.
    pub fn srt_uri(&self) -> Option<String> {
        let host = self.public_host.as_deref().map(str::trim)?;
        if host.is_empty() {
            return None;
        }
        Some(format!(
            "srt://{host}:{}?mode=caller&latency={}",
            self.srt_port, self.latency_us
        ))
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            public_host: None,
            srt_port: default_srt_port(),
            latency_us: default_latency_us(),
        }
    }
}
