//! Browser-session glue for the Rollcall client
//!
//! Everything the UI layer needs to wire [`rollcall_http::ApiClient`] into
//! a browser session: `localStorage` token persistence, a process-wide
//! client instance, and the hard-session-end redirect. Page components and
//! routing live elsewhere; this crate stays free of any rendering concern.

pub mod client;
pub mod config;
pub mod redirect;
pub mod storage;

pub use client::{api_client, init_client, is_authenticated_at_startup};
pub use config::AuthConfig;
pub use storage::BrowserTokenStore;
