//! Durable token persistence over `localStorage`

use crate::config::AuthConfig;
use rollcall_http::client::session::TokenStore;

/// [`TokenStore`] backed by the browser's `localStorage`.
///
/// Holds no storage handle; the storage area is looked up per call. A
/// missing or blocked storage area degrades to an unauthenticated start,
/// it never crashes the app.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTokenStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?
            .get_item(AuthConfig::ACCESS_TOKEN_KEY)
            .ok()
            .flatten()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(AuthConfig::ACCESS_TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(AuthConfig::ACCESS_TOKEN_KEY);
        }
    }
}
