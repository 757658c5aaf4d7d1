use super::normalize::normalize;
use super::source::{HttpStatusSource, StatusSource};
use super::types::{CanonicalStatus, PatchAck, StatusPatch};
use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use std::sync::Arc;

/// Fetches and normalizes upstream snapshots, forwards patches.
///
/// Holds no per-request state: every fetch error travels in the returned
/// `CanonicalStatus`, so concurrent requests cannot see each other's failures.
#[derive(Clone)]
pub struct StatusSnapshotAdapter {
    source: Arc<dyn StatusSource>,
}

impl StatusSnapshotAdapter {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(Arc::new(HttpStatusSource::from_config(config)))
    }

    /// Current snapshot. Upstream failures come back as
    /// `CanonicalStatus::unavailable`, never as an error.
    pub async fn fetch(&self) -> CanonicalStatus {
        match self.source.get_status().await {
            Ok(payload) => normalize(payload),
            Err(error) => {
                tracing::warn!(error = %error, "upstream status unavailable");
                CanonicalStatus::unavailable(format!("upstream status API error: {error}"))
            }
        }
    }

    pub async fn patch(&self, patch: StatusPatch) -> Result<PatchAck, UpstreamError> {
        let body = serde_json::to_value(patch).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        match self.source.patch_status(&body).await {
            Ok(response) => {
                tracing::info!(
                    censored = ?patch.censored,
                    stream_running = ?patch.stream_running,
                    "upstream status patched"
                );
                Ok(PatchAck {
                    applied: patch,
                    response,
                })
            }
            Err(error) => {
                tracing::warn!(error = %error, "upstream status patch failed");
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for StatusSnapshotAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSnapshotAdapter").finish_non_exhaustive()
    }
}
