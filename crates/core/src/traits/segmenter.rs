//! Segmentation strategy trait

use crate::Result;

/// Splits a reply into natural, message-sized chunks.
///
/// Implementations must return chunks in input order, each trimmed and
/// non-empty. An empty input yields an empty list.
pub trait Segmenter: Send + Sync {
    /// Segment `text` into chunks
    fn segment(&self, text: &str) -> Result<Vec<String>>;

    /// Strategy name, used in diagnostics
    fn name(&self) -> &'static str;
}
