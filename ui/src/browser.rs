//! Thin wrappers over the browser APIs the pages need.

use std::time::Duration;

use autoreply_client::TokenStore;
use autoreply_client::session::TOKEN_STORAGE_KEY;
use web_sys::wasm_bindgen::JsValue;

/// Keeps the session token in `window.localStorage`.
pub struct LocalStorageStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        let Some(storage) = local_storage() else {
            tracing::error!("local storage unavailable, session will not persist");
            return;
        };
        if let Err(err) = storage.set_item(TOKEN_STORAGE_KEY, token) {
            tracing::error!(?err, "failed to store session token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.remove_item(TOKEN_STORAGE_KEY) {
                tracing::error!(?err, "failed to remove session token");
            }
        }
    }
}

/// Blocking `window.confirm`. Declines when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Full-page navigation away from the app.
pub fn redirect_to(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().set_href(url) {
        tracing::error!(?err, %url, "failed to leave the app");
    }
}

/// Rewrites the address bar without a navigation.
pub fn replace_url(path: &str) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };
    if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
        tracing::warn!(?err, %path, "failed to rewrite url");
    }
}

pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
