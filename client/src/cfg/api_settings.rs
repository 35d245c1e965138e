use serde::{Deserialize, Serialize};

/// Settings for the backend HTTP gateway.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the SawadeeAI backend, overridable via `APP_API__BASE_URL`.
    pub base_url: String,

    /// Transport timeout applied to every request.
    pub timeout_seconds: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090/api".to_string(),
            timeout_seconds: 5,
        }
    }
}
