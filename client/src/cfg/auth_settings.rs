use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthSettings {
    /// OAuth client id under which the identity provider nests client roles.
    pub client_id: String,

    /// File used to persist the access/refresh token pair between runs.
    pub token_file: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            client_id: "hotel-client".to_string(),
            token_file: ".sawadee_tokens.json".to_string(),
        }
    }
}
