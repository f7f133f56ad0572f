//! Core traits and types for the chat behavior engine
//!
//! This crate provides the foundational types shared by every other crate:
//! - Emotion types (coarse behavioral state, fine signal, intensity)
//! - Playback actions (the timeline contract handed to transports)
//! - Error types
//! - Pluggable seams (segmentation strategies, diagnostic sinks)

pub mod action;
pub mod emotion;
pub mod error;
pub mod traits;

pub use action::{ActionMetadata, ActionReason, ActionType, PlaybackAction};
pub use emotion::{normalize_signal, EmotionSignal, EmotionState, IntensityLevel};
pub use error::{Error, Result, TimelineViolation};

// Trait re-exports
pub use traits::{Diagnostic, DiagnosticSink, Segmenter};
