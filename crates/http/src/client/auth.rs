//! Authentication API client methods

use super::config::RequestConfig;
use super::{ApiClient, ClientError};
use crate::types::{LoginData, LoginRequest};
use rollcall_core::UserProfile;
use tracing::info;

impl ApiClient {
    /// Sign in with credentials and seed the session with the returned
    /// token and profile.
    ///
    /// Sent with `skip_auth`: a stale token must never ride along on a
    /// login attempt, and a 401 here means bad credentials, not a refresh
    /// candidate.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginData, ClientError> {
        let config = RequestConfig::post("/auth/login")
            .json(&request)?
            .skip_auth();
        let envelope = self
            .execute_envelope::<LoginData>(config, "Login failed")
            .await?;
        let data = envelope.data.ok_or_else(|| ClientError::Api {
            message: "Login response carried no token".to_string(),
        })?;

        self.session().set_token(&data.access_token);
        if let Some(user) = &data.user {
            self.session().set_user(user.clone());
        }
        info!("user logged in");
        Ok(data)
    }

    /// Fetch the signed-in user's profile and cache it in the session.
    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        let envelope = self
            .execute_envelope::<UserProfile>(
                RequestConfig::get("/auth/user"),
                "Failed to fetch user info",
            )
            .await?;
        let user = envelope.data.ok_or_else(|| ClientError::Api {
            message: "User info response carried no profile".to_string(),
        })?;

        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Sign out. The local session is wiped even when the server call
    /// fails; the server error still surfaces to the caller.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let outcome = self
            .execute_envelope::<serde_json::Value>(
                RequestConfig::post("/auth/logout"),
                "Logout failed",
            )
            .await;
        self.session().clear();
        info!("user logged out");
        outcome.map(|_| ())
    }
}
