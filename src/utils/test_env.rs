//! Serializes tests that read or write `QUAKE_*` process environment.

use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_quake_env() {
    let keys: Vec<String> = std::env::vars_os()
        .filter_map(|(k, _)| k.into_string().ok())
        .filter(|k| k.starts_with("QUAKE_") || k == "APP_ENV_FILE")
        .collect();
    for key in keys {
        std::env::remove_var(key);
    }
}

/// Holds the env lock with all `QUAKE_*` variables cleared; clears them again on drop.
pub(crate) struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_quake_env();
    }
}

pub(crate) fn isolated_env() -> EnvGuard {
    let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_quake_env();
    EnvGuard { _lock: lock }
}
