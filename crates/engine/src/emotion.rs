//! Emotion resolver
//!
//! Reduces a fine emotion signal to one coarse `EmotionState` by weighted
//! voting: each recognized `(label, level)` entry adds the level's weight to
//! the bucket its label maps to. The strictly heaviest bucket wins; empty,
//! unrecognized or tied signals resolve to neutral.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use chat_behavior_config::BehaviorConfig;
use chat_behavior_core::{EmotionSignal, EmotionState, IntensityLevel};

/// Labels recognized without configuration
static BUILTIN_LABELS: Lazy<HashMap<&'static str, EmotionState>> = Lazy::new(|| {
    let mut labels: HashMap<&'static str, EmotionState> = EmotionState::ALL
        .into_iter()
        .map(|state| (state.as_str(), state))
        .collect();
    labels.insert("surprised", EmotionState::Excited);
    labels
});

/// Fine signal -> coarse state resolver
#[derive(Debug, Clone, Default)]
pub struct EmotionFetcher {
    /// Configured labels, consulted before the built-in table
    extra_labels: HashMap<String, EmotionState>,
}

impl EmotionFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add label mappings on top of the built-in table
    pub fn with_labels(labels: &BTreeMap<String, EmotionState>) -> Self {
        Self {
            extra_labels: labels
                .iter()
                .map(|(label, state)| (label.trim().to_lowercase(), *state))
                .filter(|(label, _)| !label.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &BehaviorConfig) -> Self {
        Self::with_labels(&config.emotion_labels)
    }

    /// Coarse state for a normalized label, if known
    pub fn map_label(&self, label: &str) -> Option<EmotionState> {
        self.extra_labels
            .get(label)
            .copied()
            .or_else(|| BUILTIN_LABELS.get(label).copied())
    }

    /// Resolve a normalized signal; total, never fails
    pub fn fetch(&self, signal: &EmotionSignal) -> EmotionState {
        let mut scores: BTreeMap<EmotionState, u32> = BTreeMap::new();
        for (label, level) in signal {
            let (Some(state), Some(level)) = (self.map_label(label), IntensityLevel::parse(level))
            else {
                continue;
            };
            *scores.entry(state).or_default() += level.weight();
        }

        let best = scores.values().copied().max().unwrap_or(0);
        if best == 0 {
            return EmotionState::Neutral;
        }

        let mut leaders = scores.iter().filter(|(_, score)| **score == best);
        match (leaders.next(), leaders.next()) {
            (Some((state, _)), None) => *state,
            _ => EmotionState::Neutral,
        }
    }
}
