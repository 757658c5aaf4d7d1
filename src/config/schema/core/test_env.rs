use std::sync::{LazyLock, Mutex};

pub(super) static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every variable the loader consults; cleared by default in each scope.
const OVERRIDE_KEYS: &[&str] = &[
    "DELAYGATE_UPSTREAM_URL",
    "DELAYGATE_UPSTREAM_KEY",
    "DELAYGATE_COOLDOWN_SECS",
    "DELAYGATE_STATE_FILE",
    "DELAYGATE_DESTINATION_FILE",
    "DELAYGATE_GATEWAY_PORT",
    "DELAYGATE_GATEWAY_HOST",
];

/// Sets (or unsets) the given variables, clears the remaining override keys,
/// and restores everything on drop. Callers must hold `ENV_LOCK`.
pub(super) struct ScopedEnv {
    previous: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    pub(super) fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let mut previous = Vec::new();
        for key in OVERRIDE_KEYS {
            let value = vars
                .iter()
                .find(|(name, _)| name == key)
                .and_then(|(_, value)| *value);
            previous.push(((*key).to_string(), std::env::var(key).ok()));
            // SAFETY: Test-only helper. ENV_LOCK serializes all env mutation
            // in this crate's tests.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
        Self { previous }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            // SAFETY: Test-only restoration while ENV_LOCK is still held.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
