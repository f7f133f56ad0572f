//! Fail-soft segmentation wrapper

use std::sync::Arc;

use chat_behavior_core::{Diagnostic, DiagnosticSink, Result, Segmenter};

use super::RuleBasedSegmenter;

/// Runs a primary strategy and falls back to the rule-based segmenter on
/// any error (or an empty answer for non-blank text). Never fails.
pub struct FallbackSegmenter<P> {
    primary: P,
    fallback: RuleBasedSegmenter,
    sink: Arc<dyn DiagnosticSink>,
}

impl<P: Segmenter> FallbackSegmenter<P> {
    pub fn new(primary: P, fallback: RuleBasedSegmenter, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            primary,
            fallback,
            sink,
        }
    }

    fn fall_back(&self, text: &str, reason: String) -> Result<Vec<String>> {
        self.sink.report(Diagnostic::SegmentationFallback {
            strategy: self.primary.name().to_string(),
            reason,
        });
        self.fallback.segment(text)
    }
}

impl<P: Segmenter> Segmenter for FallbackSegmenter<P> {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        match self.primary.segment(text) {
            Ok(segments) if segments.is_empty() && !text.trim().is_empty() => {
                self.fall_back(text, "primary strategy returned no segments".to_string())
            }
            Ok(segments) => Ok(segments),
            Err(err) => self.fall_back(text, err.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use chat_behavior_core::Error;

    struct Failing;

    impl Segmenter for Failing {
        fn segment(&self, _text: &str) -> Result<Vec<String>> {
            Err(Error::Segmentation("service unavailable".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct Fixed(Vec<&'static str>);

    impl Segmenter for Fixed {
        fn segment(&self, _text: &str) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_error_falls_back_to_rules() {
        let sink = Arc::new(MemorySink::new());
        let segmenter = FallbackSegmenter::new(Failing, RuleBasedSegmenter::new(60), sink.clone());

        let segments = segmenter.segment("One. Two.").unwrap();
        assert_eq!(segments, vec!["One.", "Two."]);

        let reported = sink.take();
        assert_eq!(reported.len(), 1);
        assert!(matches!(
            &reported[0],
            Diagnostic::SegmentationFallback { strategy, reason }
                if strategy == "failing" && reason.contains("service unavailable")
        ));
    }

    #[test]
    fn test_success_passes_through() {
        let sink = Arc::new(MemorySink::new());
        let segmenter = FallbackSegmenter::new(
            Fixed(vec!["whole thing"]),
            RuleBasedSegmenter::new(60),
            sink.clone(),
        );

        assert_eq!(segmenter.segment("One. Two.").unwrap(), vec!["whole thing"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_answer_for_real_text_falls_back() {
        let sink = Arc::new(MemorySink::new());
        let segmenter =
            FallbackSegmenter::new(Fixed(vec![]), RuleBasedSegmenter::new(60), sink.clone());

        assert_eq!(segmenter.segment("Hi!").unwrap(), vec!["Hi!"]);
        assert_eq!(sink.len(), 1);
    }
}
