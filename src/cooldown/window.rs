use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Lock state derived from the last admitted toggle. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockWindow {
    pub locked: bool,
    pub seconds_remaining: u64,
    /// How far through the cooldown we are, 0..=100.
    pub progress_percent: u8,
}

impl LockWindow {
    /// No cooldown in effect.
    pub fn unlocked() -> Self {
        Self {
            locked: false,
            seconds_remaining: 0,
            progress_percent: 100,
        }
    }

    /// A cooldown that has just begun.
    pub fn full(cooldown: Duration) -> Self {
        Self::compute(Duration::ZERO, cooldown)
    }

    /// Window for a toggle at `last`, observed at `now`. A `last` in the
    /// future (clock moved backwards) counts as zero elapsed.
    pub fn since(last: DateTime<Utc>, now: DateTime<Utc>, cooldown: Duration) -> Self {
        let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
        Self::compute(elapsed, cooldown)
    }

    fn compute(elapsed: Duration, cooldown: Duration) -> Self {
        if elapsed >= cooldown {
            return Self::unlocked();
        }

        let remaining = cooldown - elapsed;
        let seconds_remaining = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        let progress = elapsed.as_nanos() * 100 / cooldown.as_nanos().max(1);

        Self {
            locked: true,
            seconds_remaining,
            progress_percent: u8::try_from(progress.min(100)).unwrap_or(100),
        }
    }
}
