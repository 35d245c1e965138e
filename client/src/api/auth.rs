use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::{ApiClient, ApiError};

/// Token pair returned by the identity endpoints.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Customer,
    HotelOwner,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,
}

impl ApiClient {
    pub async fn auth_login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .http()
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }));
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn auth_register(&self, data: &RegisterData) -> Result<(), ApiError> {
        let request = self.http().post(self.url("/auth/register")).json(data);
        self.send(request, None).await?;
        Ok(())
    }

    pub async fn auth_refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .http()
            .post(self.url("/auth/refresh"))
            .json(&json!({ "refresh_token": refresh_token }));
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn auth_logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let request = self
            .http()
            .post(self.url("/auth/logout"))
            .json(&json!({ "refresh_token": refresh_token }));
        self.send(request, None).await?;
        Ok(())
    }
}
