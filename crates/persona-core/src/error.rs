//! Errors that end an analysis

use thiserror::Error;

/// Failures surfaced to the caller of the pipeline
///
/// Inference problems never appear here: they are absorbed into the
/// fallback persona. A failure on one content sequence is likewise absorbed
/// unless both sequences come back empty.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Missing or placeholder credentials, detected before any network call
    #[error("missing required credentials: {}", .missing.join(", "))]
    Configuration { missing: Vec<String> },

    #[error("could not extract a username from '{0}'")]
    InvalidProfile(String),

    #[error("user '{0}' not found or inaccessible")]
    UserNotFound(String),

    #[error("no content found for user '{0}'")]
    EmptyContent(String),

    /// The content platform rejected us outright (token grant, lookup)
    #[error("content source failed: {0}")]
    Source(String),
}

impl AnalysisError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, AnalysisError::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_lists_every_key() {
        let err = AnalysisError::Configuration {
            missing: vec!["REDDIT_CLIENT_ID".to_string(), "GROQ_API_KEY".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required credentials: REDDIT_CLIENT_ID, GROQ_API_KEY"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_user_not_found_message() {
        let err = AnalysisError::UserNotFound("ghost".to_string());
        assert!(err.to_string().contains("ghost"));
        assert!(!err.is_configuration());
    }
}
