use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckinSettings {
    /// Maximum duration of a face-liveness capture before it is aborted.
    pub liveness_max_capture_seconds: u64,

    /// Pause between a confirmed liveness check and revealing the digital key.
    pub key_reveal_delay_ms: u64,
}

impl Default for CheckinSettings {
    fn default() -> Self {
        Self {
            liveness_max_capture_seconds: 20,
            key_reveal_delay_ms: 1500,
        }
    }
}
