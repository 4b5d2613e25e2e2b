//! Rollcall HTTP client
//!
//! Typed client for the Rollcall HR API with transparent access-token
//! refresh. A 401 on an authenticated request triggers a single refresh
//! call no matter how many requests fail in the same window; the rest queue
//! behind it and retry once the new token is in place. Consumers observe a
//! reference-counted loading indicator and a session store that mirrors the
//! token into durable storage.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ApiClient, ApiClientBuilder};
