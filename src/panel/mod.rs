//! Control surface core: composes the cooldown guard, the upstream adapter
//! and the destination manager into the operations the HTTP and CLI front
//! ends expose.

mod view;

pub use view::ControlView;

use crate::config::Config;
use crate::cooldown::{Admission, LockWindow, ToggleCooldownGuard};
use crate::destination::{DestinationConfigManager, SecretUpdate};
use crate::error::Result;
use crate::status::{CanonicalStatus, StatusPatch, StatusSnapshotAdapter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Result of a censorship toggle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CensorOutcome {
    Applied {
        censored: bool,
    },
    /// Cooldown running; nothing was forwarded.
    Locked {
        #[serde(flatten)]
        window: LockWindow,
    },
    /// Admitted (the cooldown window is consumed) but the upstream refused.
    PatchFailed {
        censored: bool,
        error: String,
    },
    /// The toggle timestamp could not be persisted; nothing was forwarded.
    StoreFailed {
        error: String,
    },
}

/// Result of a stream start/stop request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StreamOutcome {
    Applied { running: bool },
    DestinationMissing,
    PatchFailed { running: bool, error: String },
}

#[derive(Clone)]
pub struct ControlPanel {
    guard: Arc<ToggleCooldownGuard>,
    status: StatusSnapshotAdapter,
    destination: Arc<DestinationConfigManager>,
    ingest_uri: Option<String>,
}

impl ControlPanel {
    pub fn new(
        guard: Arc<ToggleCooldownGuard>,
        status: StatusSnapshotAdapter,
        destination: Arc<DestinationConfigManager>,
        ingest_uri: Option<String>,
    ) -> Self {
        Self {
            guard,
            status,
            destination,
            ingest_uri,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ToggleCooldownGuard::from_config(&config.cooldown)),
            StatusSnapshotAdapter::from_config(&config.upstream),
            Arc::new(DestinationConfigManager::from_config(&config.destination)),
            config.ingest.srt_uri(),
        )
    }

    pub fn guard(&self) -> &ToggleCooldownGuard {
        &self.guard
    }

    pub fn destination(&self) -> &DestinationConfigManager {
        &self.destination
    }

    /// Current view. The upstream is only queried once a destination is
    /// configured; before that the status is a quiet default.
    pub async fn view(&self, now: DateTime<Utc>) -> ControlView {
        let destination = self.destination.current();
        let status = if destination.is_configured() {
            self.status.fetch().await
        } else {
            CanonicalStatus::default()
        };
        let window = self.lock_window(now).await;

        ControlView::assemble(
            status,
            window,
            destination.is_configured(),
            destination.masked_secret(),
            self.ingest_uri.clone(),
        )
    }

    /// Turn censorship on or off, subject to the cooldown. The cooldown is
    /// committed before the upstream call, so a failed patch still uses it up.
    pub async fn set_censorship(&self, on: bool, now: DateTime<Utc>) -> CensorOutcome {
        match self.admit_toggle(now).await {
            Ok(Admission::Rejected(window)) => CensorOutcome::Locked { window },
            Ok(Admission::Admitted(_)) => match self.status.patch(StatusPatch::censorship(on)).await
            {
                Ok(_) => CensorOutcome::Applied { censored: on },
                Err(error) => CensorOutcome::PatchFailed {
                    censored: on,
                    error: error.to_string(),
                },
            },
            Err(error) => {
                tracing::error!(error = %error, "could not record censorship toggle");
                CensorOutcome::StoreFailed { error }
            }
        }
    }

    /// The guard does blocking file I/O under locks; keep it off the async
    /// workers.
    async fn admit_toggle(&self, now: DateTime<Utc>) -> std::result::Result<Admission, String> {
        let guard = Arc::clone(&self.guard);
        match tokio::task::spawn_blocking(move || guard.try_admit_toggle(now)).await {
            Ok(admission) => admission.map_err(|error| error.to_string()),
            Err(join_error) => Err(format!("toggle task failed: {join_error}")),
        }
    }

    async fn lock_window(&self, now: DateTime<Utc>) -> LockWindow {
        let guard = Arc::clone(&self.guard);
        match tokio::task::spawn_blocking(move || guard.current_lock_window(now)).await {
            Ok(window) => window,
            Err(join_error) => {
                tracing::warn!(error = %join_error, "lock window task failed, reporting locked");
                LockWindow::full(self.guard.cooldown())
            }
        }
    }

    /// Start or stop the outgoing stream. Starting requires a destination.
    pub async fn set_stream_running(&self, running: bool) -> StreamOutcome {
        if running && !self.destination.is_configured() {
            tracing::info!("stream start refused, no destination configured");
            return StreamOutcome::DestinationMissing;
        }
        match self.status.patch(StatusPatch::stream(running)).await {
            Ok(_) => StreamOutcome::Applied { running },
            Err(error) => StreamOutcome::PatchFailed {
                running,
                error: error.to_string(),
            },
        }
    }

    pub async fn set_destination_secret(&self, secret: &str) -> Result<SecretUpdate> {
        Ok(self.destination.set_secret(secret).await?)
    }
}

impl std::fmt::Debug for ControlPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlPanel")
            .field("guard", &self.guard)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}
