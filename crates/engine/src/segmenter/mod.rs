//! Segmentation strategies
//!
//! - `RuleBasedSegmenter`: punctuation-driven scanner, never fails
//! - `RemoteSegmenter`: HTTP mini-model (feature `mini-model`)
//! - `FallbackSegmenter`: wraps any strategy, degrades to rules on failure

mod charclass;
mod fallback;
#[cfg(feature = "mini-model")]
mod remote;
mod rules;

use std::sync::Arc;

pub use charclass::{is_dash, is_symbol};
pub use fallback::FallbackSegmenter;
#[cfg(feature = "mini-model")]
pub use remote::RemoteSegmenter;
pub use rules::{RuleBasedSegmenter, Segments};

use chat_behavior_config::constants::segmentation::SOFT_TRAILING_PUNCTUATION;
use chat_behavior_config::BehaviorConfig;
use chat_behavior_core::{DiagnosticSink, Segmenter};

/// Strip a single dangling soft punctuation mark from the end of a chunk.
///
/// Runs of two or more (`"等等，，"`, `"好。。"`) are left alone.
pub fn trim_trailing_punctuation(chunk: &str) -> &str {
    let trimmed = chunk.trim_end();
    let stripped = trimmed.trim_end_matches(SOFT_TRAILING_PUNCTUATION);
    let run = trimmed[stripped.len()..].chars().count();
    if run == 1 {
        stripped.trim_end()
    } else {
        trimmed
    }
}

/// Select the segmentation strategy from configuration
#[cfg(feature = "mini-model")]
pub fn build_segmenter(config: &BehaviorConfig, sink: Arc<dyn DiagnosticSink>) -> Box<dyn Segmenter> {
    use std::time::Duration;

    let rules = RuleBasedSegmenter::from_config(config);
    if !config.use_mini_model {
        return Box::new(rules);
    }

    let endpoint = match config.mini_model_endpoint.as_deref() {
        Some(endpoint) if !endpoint.trim().is_empty() => endpoint,
        _ => {
            report_unavailable(sink.as_ref(), "no mini model endpoint configured");
            return Box::new(rules);
        }
    };

    let timeout = if config.mini_model_timeout.is_finite() && config.mini_model_timeout > 0.0 {
        Duration::from_secs_f64(config.mini_model_timeout)
    } else {
        Duration::from_secs_f64(chat_behavior_config::constants::mini_model::DEFAULT_TIMEOUT_SECS)
    };

    match RemoteSegmenter::new(endpoint, timeout) {
        Ok(remote) => {
            tracing::info!(
                endpoint = remote.endpoint(),
                timeout_ms = timeout.as_millis() as u64,
                "Using mini model segmentation with rule-based fallback"
            );
            Box::new(FallbackSegmenter::new(remote, rules, sink))
        }
        Err(err) => {
            report_unavailable(sink.as_ref(), &err.to_string());
            Box::new(rules)
        }
    }
}

/// Select the segmentation strategy from configuration
#[cfg(not(feature = "mini-model"))]
pub fn build_segmenter(config: &BehaviorConfig, sink: Arc<dyn DiagnosticSink>) -> Box<dyn Segmenter> {
    if config.use_mini_model {
        report_unavailable(sink.as_ref(), "built without the mini-model feature");
    }
    Box::new(RuleBasedSegmenter::from_config(config))
}

fn report_unavailable(sink: &dyn DiagnosticSink, reason: &str) {
    sink.report(chat_behavior_core::Diagnostic::SegmentationFallback {
        strategy: "mini_model".to_string(),
        reason: reason.to_string(),
    });
}
