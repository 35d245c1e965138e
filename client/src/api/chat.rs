use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::{ApiClient, ApiError, Sourced};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSender {
    User,
    Ai,
    System,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Text,
    Image,
    Action,
    QuickReply,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub session_id: String,
    pub content: String,
    pub sender: MessageSender,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ChatHistoryResponse {
    #[serde(default)]
    data: Vec<ChatMessage>,
}

/// Local stand-in reply used when the chat backend is unreachable and offline
/// fallback is enabled.
fn placeholder_reply(message: &str, session_id: &str) -> ChatResponse {
    ChatResponse {
        message: ChatMessage {
            id: Some(uuid::Uuid::new_v4().to_string()),
            session_id: session_id.to_string(),
            content: format!("Thank you for your message: \"{message}\". The assistant is currently offline."),
            sender: MessageSender::Ai,
            timestamp: Utc::now(),
            message_type: MessageType::Text,
        },
        suggestions: None,
    }
}

impl ApiClient {
    pub async fn chat_send(
        &self,
        message: &str,
        session_id: &str,
        image_base64: Option<&str>,
    ) -> Result<Sourced<ChatResponse>, ApiError> {
        let request = self.http().post(self.url("/chat/send")).json(&json!({
            "message": message,
            "sessionId": session_id,
            "imageBase64": image_base64,
        }));
        let result = match self.send(request, None).await {
            Ok(response) => response.json().await.map_err(ApiError::from),
            Err(e) => Err(e),
        };
        self.recover(result, || placeholder_reply(message, session_id))
    }

    pub async fn chat_history(&self, session_id: &str) -> Result<Sourced<Vec<ChatMessage>>, ApiError> {
        let request = self
            .http()
            .get(self.url("/chat/history"))
            .query(&[("sessionId", session_id)]);
        let result = match self.send(request, None).await {
            Ok(response) => response
                .json::<ChatHistoryResponse>()
                .await
                .map(|history| history.data)
                .map_err(ApiError::from),
            Err(e) => Err(e),
        };
        self.recover(result, Vec::new)
    }
}
