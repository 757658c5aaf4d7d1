//! Toggle cooldown: a debounce gate that keeps censorship from being flipped
//! faster than the broadcast delay.
//!
//! The last admitted toggle is persisted so a toggle made right before a
//! crash still holds its window after restart.

mod guard;
mod store;
mod window;

pub use guard::{Admission, ToggleCooldownGuard};
pub use store::{
    FileToggleStore, MemoryToggleStore, StoreLock, StoredToggle, ToggleEvent, ToggleStore,
};
pub use window::LockWindow;
