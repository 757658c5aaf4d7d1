//! Upstream delay-engine status: fetch, normalize, patch.

mod adapter;
mod normalize;
mod source;
mod types;

pub use adapter::StatusSnapshotAdapter;
pub use normalize::{CENSORSHIP_LABEL_KEYS, is_truthy, normalize};
pub use source::{HttpStatusSource, StatusSource};
pub use types::{CanonicalStatus, PatchAck, StatusPatch};
