//! Persisted client state in `localStorage`.

use runhub_core::auth::TOKEN_STORAGE_KEY;

const DEBUG_KEY: &str = "debug_enabled";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn is_available() -> bool {
    local_storage().is_some()
}

fn get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

fn set(key: &str, value: &str) {
    if let Some(s) = local_storage() {
        if s.set_item(key, value).is_err() {
            log::warn!("could not persist {}", key);
        }
    }
}

fn remove(key: &str) {
    if let Some(s) = local_storage() {
        let _ = s.remove_item(key);
    }
}

pub fn token() -> Option<String> {
    get(TOKEN_STORAGE_KEY).filter(|t| !t.is_empty())
}

pub fn set_token(token: &str) {
    set(TOKEN_STORAGE_KEY, token);
}

pub fn clear_token() {
    remove(TOKEN_STORAGE_KEY);
}

pub fn debug_enabled() -> bool {
    get(DEBUG_KEY).as_deref() == Some("true")
}

pub fn set_debug_enabled(enabled: bool) {
    set(DEBUG_KEY, if enabled { "true" } else { "false" });
}
