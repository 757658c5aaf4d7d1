use super::reload::{ServiceReloader, reloader_from_argv};
use super::store::{DestinationStore, FileDestinationStore};
use super::uri::DestinationUri;
use crate::config::DestinationConfig;
use crate::error::PersistenceError;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long `set_secret` waits for the reload before answering. Kept well
/// below the gateway request timeout; a slower reload finishes in the
/// background and its result is only logged.
pub const RELOAD_WAIT_SECS: u64 = 5;

/// Outcome of a successful destination write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretUpdate {
    pub configured: bool,
    pub masked_secret: String,
    /// The write stands even if the streaming service could not be reloaded.
    pub reload_error: Option<String>,
    /// The reload was still running when the update was answered.
    pub reload_pending: bool,
}

/// Owns the output destination URI and its secret stream key.
pub struct DestinationConfigManager {
    base: String,
    store: Arc<dyn DestinationStore>,
    reloader: Arc<dyn ServiceReloader>,
    write_lock: Arc<Mutex<()>>,
    reload_wait: Duration,
}

impl DestinationConfigManager {
    pub fn new(
        base: &str,
        store: Arc<dyn DestinationStore>,
        reloader: Arc<dyn ServiceReloader>,
    ) -> Self {
        Self {
            base: base.to_string(),
            store,
            reloader,
            write_lock: Arc::new(Mutex::new(())),
            reload_wait: Duration::from_secs(RELOAD_WAIT_SECS),
        }
    }

    pub fn with_reload_wait(mut self, reload_wait: Duration) -> Self {
        self.reload_wait = reload_wait;
        self
    }

    pub fn from_config(config: &DestinationConfig) -> Self {
        Self::new(
            &config.base,
            Arc::new(FileDestinationStore::new(config.uri_path())),
            reloader_from_argv(&config.reload_command),
        )
    }

    /// Persisted destination; an unreadable store reads as unconfigured.
    pub fn current(&self) -> DestinationUri {
        match self.store.read() {
            Ok(Some(persisted)) => DestinationUri::parse(&self.base, &persisted),
            Ok(None) => DestinationUri::unconfigured(&self.base),
            Err(error) => {
                tracing::warn!(error = %error, "destination unreadable, treating as unconfigured");
                DestinationUri::unconfigured(&self.base)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.current().is_configured()
    }

    pub fn masked_secret(&self) -> String {
        self.current().masked_secret()
    }

    /// Persist `base + secret` (an empty secret clears the destination),
    /// then ask the streaming service to reload.
    ///
    /// The reload runs as its own task: dropping this future (for example
    /// on a request timeout) never interrupts a restart already under way.
    pub async fn set_secret(&self, new_secret: &str) -> Result<SecretUpdate, PersistenceError> {
        let uri = DestinationUri::new(&self.base, new_secret);
        self.write(uri.render()).await?;
        tracing::info!(configured = uri.is_configured(), "destination updated");

        let reloader = Arc::clone(&self.reloader);
        let reload = tokio::spawn(async move {
            let result = reloader.reload().await;
            match &result {
                Ok(()) => tracing::info!("streaming service reloaded"),
                Err(error) => tracing::error!(error = %error, "streaming service reload failed"),
            }
            result
        });

        let (reload_error, reload_pending) = match tokio::time::timeout(self.reload_wait, reload).await
        {
            Ok(Ok(Ok(()))) => (None, false),
            Ok(Ok(Err(error))) => (Some(error.to_string()), false),
            Ok(Err(join_error)) => (Some(format!("reload task failed: {join_error}")), false),
            Err(_) => {
                tracing::info!(
                    wait_secs = self.reload_wait.as_secs_f64(),
                    "streaming service reload still running, continuing in background"
                );
                (None, true)
            }
        };

        Ok(SecretUpdate {
            configured: uri.is_configured(),
            masked_secret: uri.masked_secret(),
            reload_error,
            reload_pending,
        })
    }

    /// Serialized, off the async workers.
    async fn write(&self, rendered: String) -> Result<(), PersistenceError> {
        let store = Arc::clone(&self.store);
        let write_lock = Arc::clone(&self.write_lock);
        tokio::task::spawn_blocking(move || {
            let _critical = write_lock
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            store.write(&rendered)
        })
        .await
        .map_err(|join_error| PersistenceError::Write {
            path: self.base.clone(),
            message: format!("write task failed: {join_error}"),
        })?
    }
}

impl std::fmt::Debug for DestinationConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationConfigManager")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
