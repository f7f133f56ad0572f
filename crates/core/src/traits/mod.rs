//! Core traits for the chat behavior engine
//!
//! Components behind these traits can be swapped without touching the
//! coordinator:
//!
//! ```text
//! Segmentation:
//!   - Segmenter: Text → ordered message-sized chunks
//!     (rule-based, remote mini-model, fail-soft wrapper)
//!
//! Diagnostics:
//!   - DiagnosticSink: receives recovered anomalies instead of a global logger
//! ```

mod diagnostics;
mod segmenter;

pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use segmenter::Segmenter;
