use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::api::checkin::{CheckinRecord, FaceVerificationRequest};
use crate::api::client::{ApiClient, ApiError};
use crate::checkin::liveness::{LivenessError, LivenessProvider};

/// The four wizard steps, in fixed linear order. There is no skip-ahead and
/// no automatic regression; only an explicit reset goes backwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WizardStep {
    Identify,
    Passport,
    Face,
    Complete,
}

/// Backend verdict for one step, fed to the pure transition function.
#[derive(Clone, Copy, Debug)]
pub enum StepOutcome {
    Started,
    PassportChecked { verified: bool },
    FaceChecked { liveness_confirmed: bool },
}

/// Pure transition function. A failed or out-of-place outcome never moves the
/// wizard, which makes the monotonic-progress invariant hold by construction.
#[must_use]
pub const fn next_step(current: WizardStep, outcome: &StepOutcome) -> WizardStep {
    match (current, outcome) {
        (WizardStep::Identify, StepOutcome::Started) => WizardStep::Passport,
        (WizardStep::Passport, StepOutcome::PassportChecked { verified: true }) => WizardStep::Face,
        (WizardStep::Face, StepOutcome::FaceChecked { liveness_confirmed: true }) => WizardStep::Complete,
        (step, _) => step,
    }
}

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("This operation belongs to the {expected:?} step, the wizard is at {actual:?}")]
    OutOfOrder { expected: WizardStep, actual: WizardStep },

    #[error("No check-in record has been started yet")]
    MissingRecord,

    #[error("Passport could not be verified, try again with a clearer image")]
    PassportRejected,

    #[error("Face verification failed, please try again")]
    LivenessRejected,

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Liveness(#[from] LivenessError),
}

/// Drives the linear check-in flow against the backend.
///
/// Every step failure is local and recoverable: the guest retries the current
/// step, and no failure rolls back a previously confirmed one.
pub struct CheckinWizard {
    api: Arc<ApiClient>,
    step: WizardStep,
    record: Option<CheckinRecord>,
    last_error: Option<String>,
}

impl CheckinWizard {
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            step: WizardStep::Identify,
            record: None,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub const fn record(&self) -> Option<&CheckinRecord> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Identify step: starts a check-in session for `email` under a freshly
    /// generated client-side user id, then advances to the passport step.
    pub async fn submit_email(&mut self, email: &str) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Identify)?;

        let user_id = Uuid::new_v4().to_string();
        match self.api.checkin_start(email, &user_id).await {
            Ok(mut record) => {
                if record.guest_email.is_empty() {
                    record.guest_email = email.to_string();
                }
                if record.user_id.is_empty() {
                    record.user_id = user_id;
                }
                self.record = Some(record);
                self.last_error = None;
                self.step = next_step(self.step, &StepOutcome::Started);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Passport step: uploads the passport image and advances only when the
    /// backend confirms it. A negative verdict keeps the step and the data
    /// entered so far; the guest retries with another image.
    pub async fn upload_passport(&mut self, file_name: &str, image: Vec<u8>) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Passport)?;
        let checkin_id = self.checkin_id()?;

        match self.api.checkin_passport(checkin_id, file_name, image).await {
            Ok(update) => {
                let verified = update.passport_verified;
                self.merge(update);
                self.step = next_step(self.step, &StepOutcome::PassportChecked { verified });
                if verified {
                    self.last_error = None;
                    Ok(())
                } else {
                    Err(self.fail(WizardError::PassportRejected))
                }
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Face step: runs the liveness challenge under the configured capture
    /// timeout, forwards its session to the backend, and on a confirmed
    /// liveness result advances after the key-reveal delay.
    pub async fn verify_face<P: LivenessProvider>(&mut self, provider: &P) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Face)?;
        let checkin_id = self.checkin_id()?;

        let settings = self.api.context().settings.checkin.clone();
        let max_capture = Duration::from_secs(settings.liveness_max_capture_seconds);
        let session = match tokio::time::timeout(max_capture, provider.capture()).await {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => return Err(self.fail(e)),
            Err(_) => return Err(self.fail(LivenessError::CaptureTimeout(max_capture))),
        };

        let verification = FaceVerificationRequest {
            checkin_id,
            faceio_session_id: session.facial_id,
            faceio_response: session.raw_response,
        };
        match self.api.checkin_face(&verification).await {
            Ok(update) => {
                let confirmed = update.liveness_verified;
                self.merge(update);
                if confirmed {
                    tokio::time::sleep(Duration::from_millis(settings.key_reveal_delay_ms)).await;
                    self.step = next_step(self.step, &StepOutcome::FaceChecked { liveness_confirmed: true });
                    self.last_error = None;
                    Ok(())
                } else {
                    Err(self.fail(WizardError::LivenessRejected))
                }
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Discards the in-memory record and returns to the identify step. The
    /// only way out of `Complete`, and the only backwards transition at all.
    pub fn reset(&mut self) {
        self.step = WizardStep::Identify;
        self.record = None;
        self.last_error = None;
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::OutOfOrder { expected, actual: self.step })
        }
    }

    fn checkin_id(&self) -> Result<i64, WizardError> {
        self.record
            .as_ref()
            .and_then(|record| record.id)
            .ok_or(WizardError::MissingRecord)
    }

    /// Merges a step response into the local record without losing fields the
    /// backend omitted, notably the guest email entered at the first step.
    fn merge(&mut self, mut update: CheckinRecord) {
        if let Some(current) = self.record.take() {
            if update.id.is_none() {
                update.id = current.id;
            }
            if update.guest_email.is_empty() {
                update.guest_email = current.guest_email;
            }
            if update.user_id.is_empty() {
                update.user_id = current.user_id;
            }
        }
        self.record = Some(update);
    }

    fn fail(&mut self, error: impl Into<WizardError>) -> WizardError {
        let error = error.into();
        self.last_error = Some(error.to_string());
        error
    }
}
