//! Process-wide client bootstrap

use crate::config;
use crate::redirect::redirect_to_login;
use crate::storage::BrowserTokenStore;
use once_cell::sync::Lazy;
use rollcall_http::{ApiClient, ClientError};
use std::sync::{Arc, Mutex};

/// Global client instance
static CLIENT: Lazy<Mutex<Option<Arc<ApiClient>>>> = Lazy::new(|| Mutex::new(None));

/// Build the process-wide client, wiring in `localStorage` persistence and
/// the login redirect. Idempotent; later calls return the existing
/// instance.
pub fn init_client() -> Result<Arc<ApiClient>, ClientError> {
    let mut slot = CLIENT.lock().expect("Failed to acquire client lock");

    if let Some(client) = slot.as_ref() {
        return Ok(Arc::clone(client));
    }

    let client = Arc::new(
        ApiClient::builder()
            .base_url(config::api_base_url())
            .token_store(Arc::new(BrowserTokenStore))
            .on_session_expired(redirect_to_login)
            .build()?,
    );
    *slot = Some(Arc::clone(&client));
    Ok(client)
}

/// Get the client instance (returns `None` before [`init_client`])
pub fn api_client() -> Option<Arc<ApiClient>> {
    CLIENT.lock().expect("Failed to acquire client lock").clone()
}

/// Whether a persisted token exists, for the initial
/// authenticated-vs-anonymous routing decision.
pub fn is_authenticated_at_startup() -> bool {
    match api_client() {
        Some(client) => client.session().is_authenticated(),
        None => false,
    }
}
