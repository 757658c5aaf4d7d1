//! Output destination: base ingest URI plus secret stream key.

mod manager;
mod reload;
mod store;
mod uri;

pub use manager::{DestinationConfigManager, RELOAD_WAIT_SECS, SecretUpdate};
pub use reload::{
    CommandReloader, NoopReloader, RELOAD_TIMEOUT_SECS, ServiceReloader, reloader_from_argv,
};
pub use store::{DestinationStore, FileDestinationStore, MemoryDestinationStore};
pub use uri::{DestinationUri, MASK_CHAR, mask_secret, normalize_base};
