use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::{ACCESS_TOKEN_KEY, TokenStore};
use crate::core::{ArcContext, Context, TenantScope};

/// Header carrying the tenant scope on every outgoing request.
pub const TENANT_HEADER: &str = "X-Tenant-ID";

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized, the session has been discarded")]
    Unauthorized,

    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Whether a value came from the backend or was substituted locally.
///
/// The placeholder path exists to keep demo/dev flows rendering without a live
/// backend. Callers that need to know whether real data was returned check this
/// instead of relying on the absence of an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Provenance {
    Backend,
    Placeholder,
}

#[derive(Clone, Debug)]
pub struct Sourced<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Sourced<T> {
    pub(crate) const fn backend(value: T) -> Self {
        Self { value, provenance: Provenance::Backend }
    }

    pub(crate) const fn placeholder(value: T) -> Self {
        Self { value, provenance: Provenance::Placeholder }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.provenance, Provenance::Placeholder)
    }
}

/// Single choke point for all backend calls.
///
/// Guarantees that every request carries the bearer token (when stored) and the
/// current tenant header (when resolved), and that a 401 response discards the
/// session before any caller sees it.
pub struct ApiClient {
    ctx: ArcContext,
    base_url: String,
    offline_fallback: bool,
    on_unauthorized: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(ctx: ArcContext) -> Self {
        let base_url = ctx.settings.api.base_url.trim_end_matches('/').to_string();
        Self {
            ctx,
            base_url,
            offline_fallback: false,
            on_unauthorized: None,
        }
    }

    /// Enables substituting local placeholder values when non-critical read
    /// endpoints fail. Mutating endpoints are never affected.
    #[must_use]
    pub const fn with_offline_fallback(mut self, enabled: bool) -> Self {
        self.offline_fallback = enabled;
        self
    }

    /// Installs the hook invoked after a 401 clears the session, the seam
    /// where a UI would redirect to its login entry point.
    #[must_use]
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.ctx.tokens
    }

    #[must_use]
    pub fn tenant(&self) -> &TenantScope {
        &self.ctx.tenant
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.ctx.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Augments and dispatches a request, then applies the uniform response
    /// policy. `tenant_override` lets a caller resolve a *different* tenant
    /// than the active one; everything else uses the shared scope.
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
        tenant_override: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = request;

        if let Some(token) = self.ctx.tokens.get(ACCESS_TOKEN_KEY) {
            request = request.bearer_auth(token);
        }

        let tenant = match tenant_override {
            Some(key) => Some(key.to_string()),
            None => self.ctx.tenant.get().await,
        };
        if let Some(key) = tenant {
            request = request.header(TENANT_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.ctx.tokens.remove(ACCESS_TOKEN_KEY) {
                tracing::warn!("Failed to clear access token after 401: {e}");
            }
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(ApiError::Rejected { status: status.as_u16(), message });
        }

        Ok(response)
    }

    /// Read-endpoint fallback: substitute `placeholder` on failure when offline
    /// fallback is enabled. A 401 is never masked, it already tore down the
    /// session and must short-circuit the caller.
    pub(crate) fn recover<T>(
        &self,
        result: Result<T, ApiError>,
        placeholder: impl FnOnce() -> T,
    ) -> Result<Sourced<T>, ApiError> {
        match result {
            Ok(value) => Ok(Sourced::backend(value)),
            Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
            Err(e) if self.offline_fallback => {
                tracing::warn!("Falling back to placeholder data: {e}");
                Ok(Sourced::placeholder(placeholder()))
            }
            Err(e) => Err(e),
        }
    }
}
