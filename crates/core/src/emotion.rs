//! Emotion types
//!
//! Two levels of emotional information flow through the engine:
//! - A fine-grained signal from an external classifier (open label set,
//!   each label tagged with an intensity)
//! - A coarse `EmotionState` that selects timing and typo multipliers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fine emotion signal: label -> intensity level, both free-form strings.
///
/// Ordered so that metadata built from it serializes deterministically.
pub type EmotionSignal = BTreeMap<String, String>;

/// Coarse behavioral emotion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionState {
    #[default]
    Neutral,
    Happy,
    Excited,
    Sad,
    Angry,
    Anxious,
    Confused,
}

impl EmotionState {
    /// All states, in declaration order
    pub const ALL: [EmotionState; 7] = [
        EmotionState::Neutral,
        EmotionState::Happy,
        EmotionState::Excited,
        EmotionState::Sad,
        EmotionState::Angry,
        EmotionState::Anxious,
        EmotionState::Confused,
    ];

    /// Wire name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionState::Neutral => "neutral",
            EmotionState::Happy => "happy",
            EmotionState::Excited => "excited",
            EmotionState::Sad => "sad",
            EmotionState::Angry => "angry",
            EmotionState::Anxious => "anxious",
            EmotionState::Confused => "confused",
        }
    }

    /// Parse a wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|state| state.as_str() == lower)
    }
}

impl fmt::Display for EmotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intensity attached to a fine emotion label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl IntensityLevel {
    /// Weight contributed to the coarse state bucket
    pub fn weight(&self) -> u32 {
        match self {
            IntensityLevel::Low => 1,
            IntensityLevel::Medium => 2,
            IntensityLevel::High => 3,
            IntensityLevel::Extreme => 4,
        }
    }

    /// Parse an intensity string; anything outside the known set is `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(IntensityLevel::Low),
            "medium" => Some(IntensityLevel::Medium),
            "high" => Some(IntensityLevel::High),
            "extreme" => Some(IntensityLevel::Extreme),
            _ => None,
        }
    }
}

/// Normalize a raw signal: trim and lowercase keys and values, drop blanks.
pub fn normalize_signal<'a, I, K, V>(raw: I) -> EmotionSignal
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: AsRef<str> + ?Sized + 'a,
    V: AsRef<str> + ?Sized + 'a,
{
    raw.into_iter()
        .filter_map(|(label, level)| {
            let label = label.as_ref().trim().to_lowercase();
            let level = level.as_ref().trim().to_lowercase();
            if label.is_empty() || level.is_empty() {
                None
            } else {
                Some((label, level))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_state_round_trips_through_wire_name() {
        for state in EmotionState::ALL {
            assert_eq!(EmotionState::parse(state.as_str()), Some(state));
        }
        assert_eq!(EmotionState::parse(" Happy "), Some(EmotionState::Happy));
        assert_eq!(EmotionState::parse("playful"), None);
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&EmotionState::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");
    }

    #[test]
    fn test_intensity_weights_are_ordered() {
        assert_eq!(IntensityLevel::Low.weight(), 1);
        assert_eq!(IntensityLevel::Medium.weight(), 2);
        assert_eq!(IntensityLevel::High.weight(), 3);
        assert_eq!(IntensityLevel::Extreme.weight(), 4);
        assert_eq!(IntensityLevel::parse("HIGH"), Some(IntensityLevel::High));
        assert_eq!(IntensityLevel::parse("mid"), None);
    }

    #[test]
    fn test_normalize_signal_drops_blank_entries() {
        let mut raw = HashMap::new();
        raw.insert("  Happy ".to_string(), "Medium".to_string());
        raw.insert("".to_string(), "high".to_string());
        raw.insert("sad".to_string(), "   ".to_string());

        let normalized = normalize_signal(&raw);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.get("happy").map(String::as_str), Some("medium"));
    }
}
