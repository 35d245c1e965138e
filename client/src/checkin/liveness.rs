use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LivenessError {
    #[error("Face capture did not finish within {0:?}")]
    CaptureTimeout(Duration),

    #[error("Face capture failed: {0}")]
    CaptureFailed(String),
}

/// Outcome of an external face-liveness capture, forwarded to the backend.
#[derive(Clone, Debug)]
pub struct LivenessSession {
    pub facial_id: String,
    pub raw_response: String,
}

/// Seam for the external face-liveness SDK. The wizard enforces the maximum
/// capture duration around this call; implementations only run the challenge.
#[allow(async_fn_in_trait)]
pub trait LivenessProvider {
    async fn capture(&self) -> Result<LivenessSession, LivenessError>;
}
