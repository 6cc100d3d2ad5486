use reqwest::StatusCode;
use serde_json::Value;

pub type SendResult<T> = Result<T, SendError>;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("invalid proxy configuration: {0}")]
    InvalidProxy(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("send api error: {message}")]
    Platform {
        message: String,
        code: Option<i64>,
        error_type: Option<String>,
        raw: Value,
    },

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: Value },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl SendError {
    pub fn from_platform(raw: &Value) -> Self {
        let message = raw
            .get("message")
            .and_then(|v| v.as_str())
            .or_else(|| raw.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| raw.to_string());
        SendError::Platform {
            message,
            code: raw.get("code").and_then(|v| v.as_i64()),
            error_type: raw
                .get("type")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            raw: raw.clone(),
        }
    }

    pub fn platform_message(&self) -> Option<&str> {
        match self {
            SendError::Platform { message, .. } => Some(message),
            _ => None,
        }
    }
}
