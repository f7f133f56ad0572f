//! Diagnostic sinks

use parking_lot::Mutex;

use chat_behavior_core::{Diagnostic, DiagnosticSink};

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::ExcessiveSegments {
                count,
                limit,
                preview,
            } => {
                tracing::error!(count, limit, preview = %preview, "Excessive segmentation, output truncated");
            }
            Diagnostic::SegmentationFallback { strategy, reason } => {
                tracing::warn!(strategy = %strategy, reason = %reason, "Segmentation strategy failed, using rules");
            }
            Diagnostic::EmptyAfterNormalization { fallback_used } => {
                tracing::warn!(fallback_used, "All segments empty after normalization");
            }
        }
    }
}

/// Collects diagnostics in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Drain the recorded diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_and_drains() {
        let sink = MemorySink::new();
        sink.report(Diagnostic::EmptyAfterNormalization {
            fallback_used: false,
        });
        sink.report(Diagnostic::SegmentationFallback {
            strategy: "mini_model".to_string(),
            reason: "timeout".to_string(),
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.diagnostics().len(), 2);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_every_kind() {
        let sink = TracingSink;
        sink.report(Diagnostic::ExcessiveSegments {
            count: 30,
            limit: 20,
            preview: "...".to_string(),
        });
        sink.report(Diagnostic::EmptyAfterNormalization {
            fallback_used: true,
        });
    }
}
