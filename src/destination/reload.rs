use crate::error::SignalError;
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

/// Upper bound on a reload command (e.g. `systemctl restart`).
pub const RELOAD_TIMEOUT_SECS: u64 = 30;

/// Tells the streaming service to pick up a new destination.
#[async_trait]
pub trait ServiceReloader: Send + Sync {
    async fn reload(&self) -> Result<(), SignalError>;
}

/// Runs a fixed argv, e.g. `sudo /bin/systemctl restart streamdelay.service`.
#[derive(Debug, Clone)]
pub struct CommandReloader {
    argv: Vec<String>,
    timeout: Duration,
}

impl CommandReloader {
    /// `None` for an empty argv.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.first().is_none_or(|program| program.trim().is_empty()) {
            return None;
        }
        Some(Self {
            argv,
            timeout: Duration::from_secs(RELOAD_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn display(&self) -> String {
        self.argv.join(" ")
    }
}

#[async_trait]
impl ServiceReloader for CommandReloader {
    async fn reload(&self) -> Result<(), SignalError> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| SignalError::Spawn {
                command: String::new(),
                message: "empty command".into(),
            })?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| SignalError::Timeout {
                command: self.display(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|error| SignalError::Spawn {
                command: self.display(),
                message: error.to_string(),
            })?;

        if !output.status.success() {
            return Err(SignalError::Exit {
                command: self.display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Used when no reload command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReloader;

#[async_trait]
impl ServiceReloader for NoopReloader {
    async fn reload(&self) -> Result<(), SignalError> {
        tracing::debug!("no reload command configured, skipping");
        Ok(())
    }
}

pub fn reloader_from_argv(argv: &[String]) -> Arc<dyn ServiceReloader> {
    match CommandReloader::new(argv.to_vec()) {
        Some(reloader) => Arc::new(reloader),
        None => Arc::new(NoopReloader),
    }
}
