use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::auth::TokenStore;
use crate::cfg;

pub type ArcContext = Arc<Context>;

/// The process-wide "current tenant" scope consumed by the API gateway.
///
/// Written by the tenant resolver (and by flows that explicitly switch tenants),
/// read by every outgoing request. Changing it affects all requests dispatched
/// from that point on.
#[derive(Clone, Debug, Default)]
pub struct TenantScope(Arc<RwLock<Option<String>>>);

impl TenantScope {
    pub async fn get(&self) -> Option<String> {
        self.0.read().await.clone()
    }

    pub async fn set(&self, key: Option<String>) {
        *self.0.write().await = key;
    }
}

/// Shared state injected into every collaborator instead of hidden globals.
#[derive(Clone)]
pub struct Context {
    pub settings: cfg::ClientSettings,
    pub http: reqwest::Client,
    pub tenant: TenantScope,
    pub tokens: Arc<dyn TokenStore>,
}

impl Context {
    pub fn new(settings: cfg::ClientSettings, tokens: Arc<dyn TokenStore>) -> Result<ArcContext, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .build()?;
        Ok(Arc::new(Self {
            settings,
            http,
            tenant: TenantScope::default(),
            tokens,
        }))
    }
}
