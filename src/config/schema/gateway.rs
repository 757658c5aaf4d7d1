use serde::{Deserialize, Serialize};

/// Where the HTTP control panel listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// The panel can flip censorship on a live broadcast, so non-loopback
    /// binds need an explicit opt-in.
    #[serde(default)]
    pub allow_public_bind: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "127.0.0.1".into()
}

impl GatewayConfig {
    /// Resolve the listen address, preferring command-line values.
    pub fn bind_target(&self, host: Option<String>, port: Option<u16>) -> (String, u16) {
        (
            host.unwrap_or_else(|| self.host.clone()),
            port.unwrap_or(self.port),
        )
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allow_public_bind: false,
        }
    }
}
