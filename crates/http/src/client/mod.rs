//! Rollcall API client
//!
//! [`ApiClient`] turns a [`RequestConfig`] into an HTTP call with the
//! cross-cutting concerns applied uniformly: bearer-token injection,
//! loading-indicator tracking, and transparent single-flight token refresh
//! on 401. Typed endpoint modules (`auth`, `employee`, `attendance`,
//! `dashboard`) sit on top of [`ApiClient::execute_envelope`].

pub mod attendance;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod employee;
pub mod error;
pub mod loading;
pub mod refresh;
pub mod session;

use config::RequestConfig;
use error::ClientError;
use loading::{LoadingGuard, LoadingTracker};
use refresh::RefreshCoordinator;
use reqwest::{ClientBuilder, header};
use serde::de::DeserializeOwned;
use session::{MemoryTokenStore, SessionStore, TokenStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::types::ApiEnvelope;

type SessionExpiredHook = Box<dyn Fn() + Send + Sync>;

/// Rollcall API client
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    loading: LoadingTracker,
    refresh: RefreshCoordinator,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session state: token and authenticated-user profile.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The global loading indicator fed by non-`skip_loading` requests.
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    /// Issue a request with authorization, loading tracking, and 401
    /// interception applied.
    ///
    /// Returns the raw response for any status except an eligible 401; a
    /// first 401 on an authenticated request triggers one single-flight
    /// refresh and one retry with the new token. A 401 on an
    /// already-retried request is returned as-is.
    pub async fn dispatch(&self, config: RequestConfig) -> Result<reqwest::Response, ClientError> {
        let _guard: Option<LoadingGuard> = (!config.skip_loading).then(|| self.loading.start());

        let mut token = if config.skip_auth {
            None
        } else {
            self.session.token()
        };
        let mut retried = false;

        loop {
            let response = self.send(&config, token.as_deref()).await?;

            if response.status() == reqwest::StatusCode::UNAUTHORIZED
                && !config.skip_auth
                && !retried
            {
                retried = true;
                debug!(path = %config.path, "got 401, refreshing access token");
                token = Some(self.refresh.refresh(self).await?);
                continue;
            }

            return Ok(response);
        }
    }

    /// Dispatch and decode the standard `{ success, message, data }`
    /// envelope. `default_error` backs an envelope failure that carries no
    /// server message.
    pub(crate) async fn execute_envelope<T: DeserializeOwned>(
        &self,
        config: RequestConfig,
        default_error: &str,
    ) -> Result<ApiEnvelope<T>, ClientError> {
        let response = self.dispatch(config).await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| default_error.to_string()),
            });
        }
        Ok(envelope)
    }

    /// Build and send one HTTP request. No interception of any kind; the
    /// retry and refresh policies live in [`Self::dispatch`].
    pub(crate) async fn send(
        &self,
        config: &RequestConfig,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.base_url, config.path);
        let mut request = self.http.request(config.method.clone(), url);

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !config.params.is_empty() {
            request = request.query(&config.params);
        }
        if let Some(body) = &config.body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    pub(crate) fn notify_session_expired(&self) {
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    token_store: Option<Arc<dyn TokenStore>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Durable persistence for the access token. Defaults to an in-memory
    /// store.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Hook invoked when a failed refresh ends the session. The routing
    /// layer plugs its "back to login" navigation in here.
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Box::new(hook));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| "rollcall-client/0.1.0".to_string());

        #[cfg(not(target_arch = "wasm32"))]
        let http = {
            let mut builder = ClientBuilder::new().user_agent(user_agent);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let http = {
            let _ = self.timeout; // Timeouts not supported on WASM
            ClientBuilder::new().user_agent(user_agent).build()?
        };

        let token_store = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        Ok(ApiClient {
            http,
            base_url,
            session: SessionStore::new(token_store),
            loading: LoadingTracker::new(),
            refresh: RefreshCoordinator::new(),
            on_session_expired: self.on_session_expired,
        })
    }
}
