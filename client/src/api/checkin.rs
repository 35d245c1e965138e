use reqwest::multipart;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::{ApiClient, ApiError};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckinStatus {
    #[default]
    Pending,
    InProgress,
    PassportUploaded,
    PassportVerified,
    PendingFaceVerification,
    LivenessVerified,
    Completed,
    Failed,
    Cancelled,
}

/// The evolving check-in record returned by every step endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub guest_email: String,
    #[serde(default)]
    pub passport_verified: bool,
    #[serde(default)]
    pub liveness_verified: bool,
    #[serde(default)]
    pub status: CheckinStatus,
    #[serde(default)]
    pub verification_errors: Option<String>,
}

/// Result of the external liveness SDK, forwarded verbatim to the backend.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceVerificationRequest {
    pub checkin_id: i64,
    pub faceio_session_id: String,
    pub faceio_response: String,
}

impl ApiClient {
    pub async fn checkin_start(&self, guest_email: &str, user_id: &str) -> Result<CheckinRecord, ApiError> {
        let request = self.http().post(self.url("/checkin/start")).json(&json!({
            "guestEmail": guest_email,
            "userId": user_id,
        }));
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn checkin_passport(
        &self,
        checkin_id: i64,
        file_name: &str,
        image: Vec<u8>,
    ) -> Result<CheckinRecord, ApiError> {
        let form = multipart::Form::new()
            .part("passport", multipart::Part::bytes(image).file_name(file_name.to_string()))
            .text("checkinId", checkin_id.to_string());
        let request = self.http().post(self.url("/checkin/passport")).multipart(form);
        Ok(self.send(request, None).await?.json().await?)
    }

    pub async fn checkin_face(&self, verification: &FaceVerificationRequest) -> Result<CheckinRecord, ApiError> {
        let request = self
            .http()
            .post(self.url("/checkin/face-verification"))
            .json(verification);
        Ok(self.send(request, None).await?.json().await?)
    }
}
