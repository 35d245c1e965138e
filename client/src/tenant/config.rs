use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::client::ApiClient;
use crate::tenant::resolver::resolve_tenant_key;

/// One hotel brand's presentation identity. Fetched whole from the
/// configuration service and never partially mutated by the client.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    pub id: String,
    pub tenant_key: String,
    pub name: String,
    pub domain: String,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl TenantConfig {
    /// Built-in default theme. The UI must never be left without a renderable
    /// configuration, so every resolution failure degrades to this.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: "default".to_string(),
            tenant_key: "default".to_string(),
            name: "SawadeeAI Hotel".to_string(),
            domain: "localhost".to_string(),
            primary_color: "#2B6CB0".to_string(),
            secondary_color: "#3182CE".to_string(),
            logo: None,
            active: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTenant {
    pub tenant_key: String,
    pub name: String,
    pub domain: String,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Resolves tenant identity and propagates it to the shared request scope.
pub struct TenantResolver {
    api: Arc<ApiClient>,
}

impl TenantResolver {
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Loads the configuration for `key` and makes it the active tenant.
    ///
    /// The shared tenant scope is always updated (set to the key, or cleared
    /// for the sentinel) so that all subsequent requests are tagged
    /// consistently. Fetch failures degrade silently to the built-in default
    /// theme; they are logged, never surfaced as blocking errors.
    pub async fn activate(&self, key: Option<&str>) -> TenantConfig {
        self.api.tenant().set(key.map(String::from)).await;

        let Some(key) = key else {
            return TenantConfig::fallback();
        };

        match self.api.tenant_by_key(key).await {
            Ok(config) => {
                tracing::info!("Activated tenant '{}' ({})", config.tenant_key, config.name);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config for tenant '{key}', using default theme: {e}");
                TenantConfig::fallback()
            }
        }
    }

    /// Resolves the tenant key from `url` and activates it.
    pub async fn activate_from_url(&self, url: &Url) -> TenantConfig {
        let key = resolve_tenant_key(url);
        self.activate(key.as_deref()).await
    }
}
