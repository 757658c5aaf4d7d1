use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// What the toggle guard assumes when the persisted timestamp cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorruptStatePolicy {
    /// Treat unreadable state as "never toggled" (unlocked).
    #[default]
    Open,
    /// Treat unreadable state as a toggle that just happened (locked).
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// Minimum seconds between two admitted censorship toggles (default: 15)
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    /// File holding the last admitted toggle timestamp
    #[serde(default = "default_state_file")]
    pub state_file: String,
    #[serde(default)]
    pub on_corrupt: CorruptStatePolicy,
}

fn default_duration_secs() -> u64 {
    15
}

fn default_state_file() -> String {
    "/var/lib/streamgui/censor_toggle_ts".into()
}

impl CooldownConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.state_file).as_ref())
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            state_file: default_state_file(),
            on_corrupt: CorruptStatePolicy::default(),
        }
    }
}
