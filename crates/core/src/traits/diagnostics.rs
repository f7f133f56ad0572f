//! Diagnostic reporting
//!
//! Anomalies the engine recovers from locally are handed to an injected
//! sink rather than a process-wide logger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recovered anomaly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Segmentation produced more chunks than the ceiling; output truncated
    ExcessiveSegments {
        count: usize,
        limit: usize,
        preview: String,
    },
    /// A segmentation strategy failed and the rule-based one was used
    SegmentationFallback { strategy: String, reason: String },
    /// Every chunk normalized to nothing; whole input used instead
    EmptyAfterNormalization { fallback_used: bool },
}

impl Diagnostic {
    /// Whether the anomaly points at malformed input rather than a
    /// transient collaborator problem
    pub fn is_input_anomaly(&self) -> bool {
        matches!(
            self,
            Diagnostic::ExcessiveSegments { .. } | Diagnostic::EmptyAfterNormalization { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ExcessiveSegments {
                count,
                limit,
                preview,
            } => write!(
                f,
                "excessive segments ({count}), truncated to {limit}; input preview: {preview}"
            ),
            Diagnostic::SegmentationFallback { strategy, reason } => {
                write!(f, "{strategy} segmentation failed, fell back to rules: {reason}")
            }
            Diagnostic::EmptyAfterNormalization { fallback_used } => write!(
                f,
                "all segments empty after normalization (whole-input fallback used: {fallback_used})"
            ),
        }
    }
}

/// Receiver for recovered anomalies
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}
