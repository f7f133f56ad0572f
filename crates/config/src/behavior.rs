//! Behavior engine configuration

use chat_behavior_core::EmotionState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{mini_model, pause, segmentation, typo};
use crate::ConfigError;

/// Immutable configuration snapshot for one behavior pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Split replies into several messages (false = one message)
    #[serde(default = "default_true")]
    pub enable_segmentation: bool,

    /// Randomly corrupt segments
    #[serde(default = "default_true")]
    pub enable_typo: bool,

    /// Recall and resend corrupted segments
    #[serde(default = "default_true")]
    pub enable_recall: bool,

    /// Resolve a coarse emotion from the fine signal (false = always neutral)
    #[serde(default = "default_true")]
    pub enable_emotion_fetch: bool,

    /// Hard cap on chunk length (characters) before a forced cut
    #[serde(default = "default_max_segment_length")]
    pub max_segment_length: usize,

    /// Lower bound for inter-segment pauses (seconds)
    #[serde(default = "default_min_pause_duration")]
    pub min_pause_duration: f64,

    /// Upper bound for inter-segment pauses (seconds)
    #[serde(default = "default_max_pause_duration")]
    pub max_pause_duration: f64,

    /// Baseline per-segment corruption probability
    #[serde(default = "default_base_typo_rate")]
    pub base_typo_rate: f64,

    /// Probability that a corrupted segment gets recalled and corrected
    #[serde(default = "default_typo_recall_rate")]
    pub typo_recall_rate: f64,

    /// Pause before recalling a typo (seconds, 0 = none)
    #[serde(default = "default_recall_delay")]
    pub recall_delay: f64,

    /// Pause between recall and resend (seconds, 0 = none)
    #[serde(default = "default_retype_delay")]
    pub retype_delay: f64,

    /// Per-state typo rate scaling (missing states scale by 1.0)
    #[serde(default = "default_emotion_typo_multiplier")]
    pub emotion_typo_multiplier: BTreeMap<EmotionState, f64>,

    /// Per-state pause scaling (missing states scale by 1.0)
    #[serde(default = "default_emotion_pause_multiplier")]
    pub emotion_pause_multiplier: BTreeMap<EmotionState, f64>,

    /// Extra fine-label -> coarse-state entries, merged over the built-in table
    #[serde(default)]
    pub emotion_labels: BTreeMap<String, EmotionState>,

    /// Override for the split-trigger character set
    #[serde(default)]
    pub split_triggers: Option<String>,

    /// Use the remote segmentation service, falling back to rules on failure
    #[serde(default)]
    pub use_mini_model: bool,

    /// Remote segmentation endpoint
    #[serde(default)]
    pub mini_model_endpoint: Option<String>,

    /// Remote segmentation timeout (seconds)
    #[serde(default = "default_mini_model_timeout")]
    pub mini_model_timeout: f64,
}

fn default_true() -> bool {
    true
}
fn default_max_segment_length() -> usize {
    segmentation::DEFAULT_MAX_SEGMENT_LENGTH
}
fn default_min_pause_duration() -> f64 {
    pause::DEFAULT_MIN_DURATION
}
fn default_max_pause_duration() -> f64 {
    pause::DEFAULT_MAX_DURATION
}
fn default_base_typo_rate() -> f64 {
    typo::DEFAULT_BASE_TYPO_RATE
}
fn default_typo_recall_rate() -> f64 {
    typo::DEFAULT_RECALL_RATE
}
fn default_recall_delay() -> f64 {
    typo::DEFAULT_RECALL_DELAY
}
fn default_retype_delay() -> f64 {
    typo::DEFAULT_RETYPE_DELAY
}
fn default_mini_model_timeout() -> f64 {
    mini_model::DEFAULT_TIMEOUT_SECS
}

fn default_emotion_typo_multiplier() -> BTreeMap<EmotionState, f64> {
    BTreeMap::from([
        (EmotionState::Neutral, 1.0),
        (EmotionState::Happy, 1.1),
        (EmotionState::Excited, 1.5),
        (EmotionState::Sad, 1.1),
        (EmotionState::Angry, 1.6),
        (EmotionState::Anxious, 1.4),
        (EmotionState::Confused, 1.3),
    ])
}

fn default_emotion_pause_multiplier() -> BTreeMap<EmotionState, f64> {
    BTreeMap::from([
        (EmotionState::Neutral, 1.0),
        (EmotionState::Happy, 0.9),
        (EmotionState::Excited, 0.8),
        (EmotionState::Sad, 1.2),
        (EmotionState::Angry, 0.9),
        (EmotionState::Anxious, 1.1),
        (EmotionState::Confused, 1.1),
    ])
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_segmentation: true,
            enable_typo: true,
            enable_recall: true,
            enable_emotion_fetch: true,
            max_segment_length: default_max_segment_length(),
            min_pause_duration: default_min_pause_duration(),
            max_pause_duration: default_max_pause_duration(),
            base_typo_rate: default_base_typo_rate(),
            typo_recall_rate: default_typo_recall_rate(),
            recall_delay: default_recall_delay(),
            retype_delay: default_retype_delay(),
            emotion_typo_multiplier: default_emotion_typo_multiplier(),
            emotion_pause_multiplier: default_emotion_pause_multiplier(),
            emotion_labels: BTreeMap::new(),
            split_triggers: None,
            use_mini_model: false,
            mini_model_endpoint: None,
            mini_model_timeout: default_mini_model_timeout(),
        }
    }
}

impl BehaviorConfig {
    /// Typo rate scaling for a state (1.0 when unconfigured)
    pub fn typo_multiplier(&self, emotion: EmotionState) -> f64 {
        self.emotion_typo_multiplier
            .get(&emotion)
            .copied()
            .unwrap_or(1.0)
    }

    /// Pause scaling for a state (1.0 when unconfigured)
    pub fn pause_multiplier(&self, emotion: EmotionState) -> f64 {
        self.emotion_pause_multiplier
            .get(&emotion)
            .copied()
            .unwrap_or(1.0)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_segment_length == 0 {
            return Err(invalid("behavior.max_segment_length", "must be greater than 0"));
        }

        for (field, value) in [
            ("behavior.min_pause_duration", self.min_pause_duration),
            ("behavior.max_pause_duration", self.max_pause_duration),
            ("behavior.recall_delay", self.recall_delay),
            ("behavior.retype_delay", self.retype_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(
                    field,
                    format!("must be a non-negative number of seconds, got {}", value),
                ));
            }
        }

        for (field, value) in [
            ("behavior.base_typo_rate", self.base_typo_rate),
            ("behavior.typo_recall_rate", self.typo_recall_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(
                    field,
                    format!("must be between 0.0 and 1.0, got {}", value),
                ));
            }
        }

        for (field, table) in [
            ("behavior.emotion_typo_multiplier", &self.emotion_typo_multiplier),
            ("behavior.emotion_pause_multiplier", &self.emotion_pause_multiplier),
        ] {
            if let Some((state, value)) = table.iter().find(|(_, v)| !v.is_finite() || **v < 0.0) {
                return Err(invalid(
                    field,
                    format!("multiplier for {} must be non-negative, got {}", state, value),
                ));
            }
        }

        if let Some(triggers) = &self.split_triggers {
            if triggers.is_empty() {
                return Err(invalid("behavior.split_triggers", "must not be empty when set"));
            }
        }

        if !self.mini_model_timeout.is_finite() || self.mini_model_timeout <= 0.0 {
            return Err(invalid(
                "behavior.mini_model_timeout",
                format!("must be positive, got {}", self.mini_model_timeout),
            ));
        }

        if self.use_mini_model
            && self
                .mini_model_endpoint
                .as_deref()
                .map_or(true, |endpoint| endpoint.trim().is_empty())
        {
            return Err(ConfigError::MissingField(
                "behavior.mini_model_endpoint".to_string(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}
