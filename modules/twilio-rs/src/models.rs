use serde::{Deserialize, Serialize};

/// Response from the Messages API.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
    pub to: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}
