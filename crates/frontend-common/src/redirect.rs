//! Hard-session-end navigation

use crate::config::AuthConfig;
use tracing::warn;

/// Send the browser to the login page. Plugged into the client as its
/// `on_session_expired` hook: a failed refresh is a hard session end.
pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(AuthConfig::LOGIN_PATH).is_ok() {
            return;
        }
    }
    warn!("could not navigate to the login page after session end");
}
