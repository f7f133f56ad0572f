//! Behavior engine
//!
//! Turns an agent reply (plus an optional fine emotion signal) into an
//! ordered playback timeline of `send`, `pause` and `recall` actions that
//! mimics a person typing into a chat app.
//!
//! # Example
//!
//! ```
//! use chat_behavior_config::BehaviorConfig;
//! use chat_behavior_engine::BehaviorCoordinator;
//!
//! let coordinator = BehaviorCoordinator::new(BehaviorConfig::default());
//! let actions = coordinator.process_message("Hi! How are you?", None).unwrap();
//! assert!(actions.iter().any(|a| a.is_send()));
//! ```

pub mod coordinator;
pub mod diagnostics;
pub mod emotion;
pub mod ids;
pub mod pause;
pub mod segmenter;
pub mod timeline;
pub mod typo;

pub use coordinator::BehaviorCoordinator;
pub use diagnostics::{MemorySink, TracingSink};
pub use emotion::EmotionFetcher;
pub use ids::MessageIds;
pub use pause::PausePredictor;
#[cfg(feature = "mini-model")]
pub use segmenter::RemoteSegmenter;
pub use segmenter::{
    build_segmenter, trim_trailing_punctuation, FallbackSegmenter, RuleBasedSegmenter,
};
pub use timeline::{total_duration, TimelineBuilder};
pub use typo::{Typo, TypoInjector};
