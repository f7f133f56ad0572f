//! Pause model
//!
//! Samples the gap between two consecutive segments.

use std::collections::BTreeMap;

use rand::Rng;

use chat_behavior_config::constants::pause::MAX_INTERVAL_SECS;
use chat_behavior_config::BehaviorConfig;
use chat_behavior_core::EmotionState;

/// Emotion-scaled inter-segment pause sampler
#[derive(Debug, Clone, Default)]
pub struct PausePredictor {
    multipliers: BTreeMap<EmotionState, f64>,
}

impl PausePredictor {
    pub fn new(multipliers: BTreeMap<EmotionState, f64>) -> Self {
        Self { multipliers }
    }

    pub fn from_config(config: &BehaviorConfig) -> Self {
        Self::new(
            EmotionState::ALL
                .into_iter()
                .map(|emotion| (emotion, config.pause_multiplier(emotion)))
                .collect(),
        )
    }

    /// Scaling for a state (1.0 when unconfigured)
    pub fn multiplier(&self, emotion: EmotionState) -> f64 {
        self.multipliers.get(&emotion).copied().unwrap_or(1.0)
    }

    /// Seconds to wait after a segment, rounded to milliseconds.
    ///
    /// Inverted bounds are swapped and negative bounds count as zero, so the
    /// result always lies in `[0, max(min, max) * multiplier]`, capped at
    /// `MAX_INTERVAL_SECS`.
    pub fn segment_interval<R: Rng + ?Sized>(
        &self,
        emotion: EmotionState,
        min_duration: f64,
        max_duration: f64,
        rng: &mut R,
    ) -> f64 {
        let (lo, hi) = if min_duration <= max_duration {
            (min_duration, max_duration)
        } else {
            (max_duration, min_duration)
        };
        let lo = finite_or_zero(lo).clamp(0.0, MAX_INTERVAL_SECS);
        let hi = finite_or_zero(hi).clamp(lo, MAX_INTERVAL_SECS);

        let base = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        let multiplier = finite_or_zero(self.multiplier(emotion)).max(0.0);

        round_millis((base * multiplier).clamp(0.0, MAX_INTERVAL_SECS))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round seconds to millisecond precision
pub fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
