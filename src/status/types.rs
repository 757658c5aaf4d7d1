use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized upstream state used by every display and decision path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalStatus {
    pub censored: bool,
    pub stream_running: bool,
    pub stream_state_label: Option<String>,
    pub censorship_state_label: Option<String>,
    /// Set when the snapshot could not be fetched; all other fields are then
    /// at their defaults.
    pub fetch_error: Option<String>,
}

impl CanonicalStatus {
    pub fn unavailable(cause: impl Into<String>) -> Self {
        Self {
            fetch_error: Some(cause.into()),
            ..Self::default()
        }
    }

    pub fn is_available(&self) -> bool {
        self.fetch_error.is_none()
    }
}

/// Partial update forwarded to the upstream `PATCH /status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    #[serde(rename = "isCensored", skip_serializing_if = "Option::is_none")]
    pub censored: Option<bool>,
    #[serde(rename = "isStreamRunning", skip_serializing_if = "Option::is_none")]
    pub stream_running: Option<bool>,
}

impl StatusPatch {
    pub fn censorship(on: bool) -> Self {
        Self {
            censored: Some(on),
            ..Self::default()
        }
    }

    pub fn stream(running: bool) -> Self {
        Self {
            stream_running: Some(running),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.censored.is_none() && self.stream_running.is_none()
    }
}

/// Upstream acknowledged a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchAck {
    pub applied: StatusPatch,
    /// Whatever the upstream returned; `{}` for an empty body.
    pub response: Value,
}
