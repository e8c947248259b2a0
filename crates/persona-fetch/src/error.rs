//! Errors from the content platform

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("user '{0}' not found or inaccessible")]
    UserNotFound(String),

    /// Token grant rejected; usually bad client credentials
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}
