use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::api::client::{ApiClient, ApiError};
use crate::auth::claims::{self, UserIdentity};
use crate::auth::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, StoreError};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_HOTEL_OWNER: &str = "client_hotel_owner";
pub const ROLE_CUSTOMER: &str = "client_customer";

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Received a token whose claims could not be decoded")]
    InvalidToken,

    #[error("Session lost, please log in again")]
    SessionLost,

    #[error("Token storage failed: {0}")]
    Store(#[from] StoreError),
}

/// Holds the client's belief about who is logged in, derived entirely from
/// locally stored tokens. Never an authentication boundary: the backend
/// re-validates the bearer token on every request.
pub struct SessionHolder {
    api: Arc<ApiClient>,
    client_id: String,
    identity: RwLock<Option<UserIdentity>>,
}

impl SessionHolder {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        let client_id = api.context().settings.auth.client_id.clone();
        Self {
            api,
            client_id,
            identity: RwLock::new(None),
        }
    }

    /// Restores a session on application start.
    ///
    /// A stored, unexpired access token is adopted without any network call.
    /// Otherwise a stored refresh token is exchanged; if that fails the stored
    /// state is cleared and the client stays unauthenticated (not an error).
    pub async fn bootstrap(&self) -> Result<(), AuthError> {
        if let Some(token) = self.api.tokens().get(ACCESS_TOKEN_KEY) {
            if !claims::is_expired(&token) {
                if let Some(user) = claims::decode_token(&token, &self.client_id) {
                    *self.identity.write().await = Some(user);
                    return Ok(());
                }
            }
        }

        if self.api.tokens().get(REFRESH_TOKEN_KEY).is_some() {
            if let Err(e) = self.refresh().await {
                tracing::warn!("Session restore failed, staying unauthenticated: {e}");
            }
        }
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserIdentity, AuthError> {
        tracing::info!("Logging in user: {username}");
        let pair = self.api.auth_login(username, password).await?;
        self.adopt(&pair.access_token, &pair.refresh_token).await
    }

    /// Registers a new account, then logs it in right away.
    pub async fn register(&self, data: &crate::api::auth::RegisterData) -> Result<UserIdentity, AuthError> {
        self.api.auth_register(data).await?;
        self.login(&data.username, &data.password).await
    }

    /// Exchanges the stored refresh token for a new pair. On failure the local
    /// session is cleared before the error propagates: the session is lost.
    pub async fn refresh(&self) -> Result<UserIdentity, AuthError> {
        let Some(token) = self.api.tokens().get(REFRESH_TOKEN_KEY) else {
            return Err(AuthError::SessionLost);
        };
        match self.api.auth_refresh(&token).await {
            Ok(pair) => self.adopt(&pair.access_token, &pair.refresh_token).await,
            Err(e) => {
                self.clear_local().await?;
                Err(AuthError::Api(e))
            }
        }
    }

    /// Clears the session immediately and notifies the identity endpoint in
    /// the background. The notification is best effort; its failure is logged
    /// and never surfaced, the user is logged out regardless.
    pub async fn logout(&self) -> Result<(), StoreError> {
        let refresh_token = self.api.tokens().get(REFRESH_TOKEN_KEY);

        self.api.tokens().remove(ACCESS_TOKEN_KEY)?;
        self.api.tokens().remove(REFRESH_TOKEN_KEY)?;
        *self.identity.write().await = None;

        if let Some(token) = refresh_token {
            let api = Arc::clone(&self.api);
            tokio::spawn(async move {
                if let Err(e) = api.auth_logout(&token).await {
                    tracing::warn!("Logout notification failed: {e}");
                }
            });
        }
        Ok(())
    }

    pub async fn current_user(&self) -> Option<UserIdentity> {
        self.identity.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// Exact string membership in the decoded role set. Roles are flat:
    /// holding `ADMIN` does not imply any other role.
    pub async fn has_role(&self, role: &str) -> bool {
        self.identity
            .read()
            .await
            .as_ref()
            .is_some_and(|user| user.has_role(role))
    }

    pub async fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN).await
    }

    pub async fn is_hotel_owner(&self) -> bool {
        self.has_role(ROLE_HOTEL_OWNER).await
    }

    pub async fn is_customer(&self) -> bool {
        self.has_role(ROLE_CUSTOMER).await
    }

    async fn adopt(&self, access_token: &str, refresh_token: &str) -> Result<UserIdentity, AuthError> {
        let user = claims::decode_token(access_token, &self.client_id).ok_or(AuthError::InvalidToken)?;
        self.api.tokens().set(ACCESS_TOKEN_KEY, access_token)?;
        self.api.tokens().set(REFRESH_TOKEN_KEY, refresh_token)?;
        *self.identity.write().await = Some(user.clone());
        Ok(user)
    }

    async fn clear_local(&self) -> Result<(), StoreError> {
        self.api.tokens().remove(ACCESS_TOKEN_KEY)?;
        self.api.tokens().remove(REFRESH_TOKEN_KEY)?;
        *self.identity.write().await = None;
        Ok(())
    }
}
