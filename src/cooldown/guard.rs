use super::store::{FileToggleStore, StoredToggle, ToggleEvent, ToggleStore};
use super::window::LockWindow;
use crate::config::{CooldownConfig, CorruptStatePolicy};
use crate::error::PersistenceError;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Result of an admission attempt. A rejection is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A new cooldown window starts at this event.
    Admitted(ToggleEvent),
    /// Still inside the window; nothing was recorded.
    Rejected(LockWindow),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }
}

/// Enforces a minimum interval between censorship toggles.
///
/// All admissions go through one critical section covering read, check and
/// write, and the store is written through before the lock is released, so
/// two concurrent callers can never both observe an unlocked window. The
/// section is an in-process mutex plus the store's own lock, which for
/// `FileToggleStore` also excludes other processes sharing the state file.
pub struct ToggleCooldownGuard {
    store: Arc<dyn ToggleStore>,
    cooldown: Duration,
    on_corrupt: CorruptStatePolicy,
    admission: Mutex<()>,
}

impl ToggleCooldownGuard {
    pub fn new(
        store: Arc<dyn ToggleStore>,
        cooldown: Duration,
        on_corrupt: CorruptStatePolicy,
    ) -> Self {
        Self {
            store,
            cooldown,
            on_corrupt,
            admission: Mutex::new(()),
        }
    }

    pub fn from_config(config: &CooldownConfig) -> Self {
        Self::new(
            Arc::new(FileToggleStore::new(config.state_path())),
            config.duration(),
            config.on_corrupt,
        )
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Read-only view of the lock at `now`. Never fails.
    pub fn current_lock_window(&self, now: DateTime<Utc>) -> LockWindow {
        match self.store.load() {
            StoredToggle::Absent => LockWindow::unlocked(),
            StoredToggle::Present(event) => {
                LockWindow::since(event.occurred_at, now, self.cooldown)
            }
            StoredToggle::Corrupt(reason) => match self.on_corrupt {
                CorruptStatePolicy::Open => {
                    tracing::warn!(%reason, "toggle state unreadable, treating as never toggled");
                    LockWindow::unlocked()
                }
                CorruptStatePolicy::Closed => {
                    tracing::warn!(%reason, "toggle state unreadable, reporting locked");
                    LockWindow::full(self.cooldown)
                }
            },
        }
    }

    /// Admit a toggle at `now` if no cooldown is running.
    ///
    /// Returns `Err` only when the new timestamp could not be persisted; the
    /// toggle is then not admitted.
    pub fn try_admit_toggle(&self, now: DateTime<Utc>) -> Result<Admission, PersistenceError> {
        let _critical = self
            .admission
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _exclusive = self.store.lock()?;

        match self.store.load() {
            StoredToggle::Absent => {}
            StoredToggle::Present(event) => {
                let window = LockWindow::since(event.occurred_at, now, self.cooldown);
                if window.locked {
                    tracing::info!(
                        seconds_remaining = window.seconds_remaining,
                        "censorship toggle rejected, cooldown active"
                    );
                    return Ok(Admission::Rejected(window));
                }
            }
            StoredToggle::Corrupt(reason) => match self.on_corrupt {
                CorruptStatePolicy::Open => {
                    tracing::warn!(%reason, "toggle state unreadable, admitting (fail-open)");
                }
                CorruptStatePolicy::Closed => {
                    tracing::warn!(
                        %reason,
                        "toggle state unreadable, restarting cooldown (fail-closed)"
                    );
                    self.store.save(&ToggleEvent::at(now))?;
                    return Ok(Admission::Rejected(LockWindow::full(self.cooldown)));
                }
            },
        }

        let event = ToggleEvent::at(now);
        self.store.save(&event)?;
        tracing::info!(
            at = %event.occurred_at,
            cooldown_secs = self.cooldown.as_secs(),
            "censorship toggle admitted"
        );
        Ok(Admission::Admitted(event))
    }
}

impl std::fmt::Debug for ToggleCooldownGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleCooldownGuard")
            .field("cooldown", &self.cooldown)
            .field("on_corrupt", &self.on_corrupt)
            .finish_non_exhaustive()
    }
}
