//! Single-flight access-token refresh
//!
//! The first 401 in a failure window drives the refresh call; every
//! overlapping 401 parks on a waiter and is settled, in FIFO order, with
//! whatever the one refresh produced. The state mutex is never held across
//! an await, so the check-then-set on `refreshing` cannot interleave with
//! another request's.

use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::ApiClient;
use super::config::RequestConfig;
use super::error::ClientError;
use crate::types::{RefreshRequest, RefreshResponse};

type Waiter = oneshot::Sender<Result<String, ClientError>>;

#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    waiters: VecDeque<Waiter>,
}

/// Coordinates at most one in-flight refresh per failure window.
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchange the current token for a fresh one, coalescing overlapping
    /// callers onto a single refresh call.
    ///
    /// On success the new token is in the session store before anyone is
    /// released to retry. On failure the session is cleared, the
    /// session-expired hook fires, and every caller gets
    /// [`ClientError::SessionExpired`].
    pub(crate) async fn refresh(&self, client: &ApiClient) -> Result<String, ClientError> {
        let waiter = {
            let mut state = self.state.lock().expect("refresh state lock poisoned");
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                Some(rx)
            } else {
                state.refreshing = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("refresh already in flight, queueing");
            return match rx.await {
                Ok(outcome) => outcome,
                // The leader dropped without settling us; treat it like a
                // failed refresh.
                Err(_) => Err(ClientError::SessionExpired {
                    message: "token refresh was abandoned".to_string(),
                }),
            };
        }

        let outcome = self.exchange(client).await;

        match &outcome {
            Ok(token) => {
                // Queued requests must observe the new token before any of
                // them retries.
                client.session().set_token(token);
                info!("access token refreshed");
            }
            Err(error) => {
                warn!(%error, "token refresh failed, ending session");
                client.session().clear();
                client.notify_session_expired();
            }
        }

        let waiters = {
            let mut state = self.state.lock().expect("refresh state lock poisoned");
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        match outcome {
            Ok(token) => {
                for waiter in waiters {
                    let _ = waiter.send(Ok(token.clone()));
                }
                Ok(token)
            }
            Err(error) => {
                let message = error.to_string();
                for waiter in waiters {
                    let _ = waiter.send(Err(ClientError::SessionExpired {
                        message: message.clone(),
                    }));
                }
                Err(ClientError::SessionExpired { message })
            }
        }
    }

    /// The refresh call itself. Goes straight to the transport: it is never
    /// intercepted, never queued behind itself, and never counted by the
    /// loading indicator (the request that triggered it is still holding a
    /// guard for the whole window).
    async fn exchange(&self, client: &ApiClient) -> Result<String, ClientError> {
        let access_token = client.session().token().unwrap_or_default();
        let config = RequestConfig::post("/auth/verify-token")
            .json(&RefreshRequest { access_token })?
            .skip_auth()
            .skip_loading();

        let response = client.send(&config, None).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }

        let body: RefreshResponse = response.json().await?;
        Ok(body.access_token)
    }
}
