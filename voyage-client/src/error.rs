use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API rejected the request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ClientError {
    /// Text sent by the server that can be shown to the user as is.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message, .. } => message.as_deref(),
            ClientError::Http(_) => None,
        }
    }
}

/// Structured error payload of the flights API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub timestamp: Option<String>,
}

/// Pulls a user-facing message out of an error response body: the `message`
/// of a JSON payload, or the body itself when it is plain text.
pub fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let message = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => serde_json::from_value::<ApiErrorBody>(Value::Object(map))
            .ok()
            .and_then(|payload| payload.message),
        Ok(Value::String(text)) => Some(text),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    };
    message.filter(|m| !m.trim().is_empty())
}
