//! Inference failures. None of these escape the inference stage.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    /// Connection refused, DNS failure, reset
    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response contained no message content")]
    EmptyResponse,

    #[error("could not parse persona JSON: {0}")]
    Parse(String),
}

impl InferenceError {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout
        } else {
            InferenceError::Network(err.to_string())
        }
    }

    /// Build a status error, keeping at most 500 chars of the body
    pub fn from_status(status: u16, body: &str) -> Self {
        InferenceError::Status {
            status,
            body: persona_core::truncate_chars(body, 500).to_string(),
        }
    }
}
