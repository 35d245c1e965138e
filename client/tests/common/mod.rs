#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;

use sawadee_client::api::client::ApiClient;
use sawadee_client::auth::MemoryTokenStore;
use sawadee_client::cfg::ClientSettings;
use sawadee_client::core::{ArcContext, Context};

/// Binds a mock backend to an ephemeral port and returns its `/api` base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Base URL on a port nothing listens on, for offline-behavior tests.
pub const DEAD_BACKEND: &str = "http://127.0.0.1:9/api";

pub fn test_settings(base_url: &str) -> ClientSettings {
    let mut settings = ClientSettings::default();
    settings.api.base_url = base_url.to_string();
    settings.api.timeout_seconds = 2;
    settings.checkin.key_reveal_delay_ms = 0;
    settings
}

pub fn test_context(settings: ClientSettings) -> ArcContext {
    Context::new(settings, Arc::new(MemoryTokenStore::default())).unwrap()
}

pub fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(test_context(test_settings(base_url)))
}

/// Mints a Keycloak-shaped HS256 token; the client never verifies the
/// signature, it only reads the claims.
pub fn mint_token(sub: &str, username: &str, exp: i64, client_roles: &[&str], realm_roles: &[&str]) -> String {
    let claims = serde_json::json!({
        "sub": sub,
        "preferred_username": username,
        "email": format!("{username}@example.com"),
        "given_name": "Test",
        "family_name": "Guest",
        "exp": exp,
        "resource_access": { "hotel-client": { "roles": client_roles } },
        "realm_access": { "roles": realm_roles },
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"mock-idp-secret"),
    )
    .unwrap()
}
