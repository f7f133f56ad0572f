//! Error types for the chat behavior engine

use thiserror::Error;

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An assembled timeline broke one of its invariants. This is a bug in
    /// timeline construction, not a problem with the input text.
    #[error("Timeline invariant violated: {0}")]
    Timeline(#[from] TimelineViolation),

    #[error("Segmentation error: {0}")]
    Segmentation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Invariant violations detected while validating a timeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineViolation {
    #[error("duplicate message id {id} at action {index}")]
    DuplicateMessageId { index: usize, id: String },

    #[error("send at action {index} has no message id")]
    MissingMessageId { index: usize },

    #[error("send at action {index} has no text")]
    MissingText { index: usize },

    #[error("{action} at action {index} must not carry a message id")]
    UnexpectedMessageId { index: usize, action: &'static str },

    #[error("recall at action {index} has no target id")]
    MissingRecallTarget { index: usize },

    #[error("recall at action {index} targets {target}, which is not an earlier send")]
    DanglingRecall { index: usize, target: String },

    #[error("action {index} has invalid duration {duration}")]
    InvalidDuration { index: usize, duration: f64 },

    #[error("{action} at action {index} must have zero duration, got {duration}")]
    UnexpectedDuration {
        index: usize,
        action: &'static str,
        duration: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_converts_into_error() {
        let err: Error = TimelineViolation::MissingRecallTarget { index: 3 }.into();
        assert!(matches!(err, Error::Timeline(_)));
        assert_eq!(
            err.to_string(),
            "Timeline invariant violated: recall at action 3 has no target id"
        );
    }
}
