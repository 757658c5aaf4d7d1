use super::Config;
use tracing::warn;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DELAYGATE_UPSTREAM_URL")
            && !url.is_empty()
        {
            self.upstream.base_url = url;
        }

        if let Ok(key) = std::env::var("DELAYGATE_UPSTREAM_KEY")
            && !key.is_empty()
        {
            self.upstream.api_key = key;
        }

        if let Ok(secs_str) = std::env::var("DELAYGATE_COOLDOWN_SECS") {
            match secs_str.parse::<u64>() {
                Ok(secs) if secs > 0 => self.cooldown.duration_secs = secs,
                _ => warn!(value = %secs_str, "ignoring invalid DELAYGATE_COOLDOWN_SECS"),
            }
        }

        if let Ok(path) = std::env::var("DELAYGATE_STATE_FILE")
            && !path.is_empty()
        {
            self.cooldown.state_file = path;
        }

        if let Ok(path) = std::env::var("DELAYGATE_DESTINATION_FILE")
            && !path.is_empty()
        {
            self.destination.uri_file = path;
        }

        if let Ok(port_str) = std::env::var("DELAYGATE_GATEWAY_PORT")
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Ok(host) = std::env::var("DELAYGATE_GATEWAY_HOST")
            && !host.is_empty()
        {
            self.gateway.host = host;
        }
    }
}
