//! Playback actions
//!
//! A playback timeline is an ordered list of `PlaybackAction`s:
//! - `send`: deliver a message bubble (text + unique id)
//! - `pause`: wait `duration` seconds before the next action
//! - `recall`: retract an earlier `send` by id
//!
//! The JSON shape is the contract consumed by transports and clients.

use serde::{Deserialize, Serialize};

use crate::emotion::{EmotionSignal, EmotionState};

/// Kind of playback action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Send,
    Pause,
    Recall,
}

/// Why a non-send action was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionReason {
    /// Gap between two consecutive segments
    SegmentInterval,
    /// Hesitation before retracting a typo'd message
    TypoRecallDelay,
    /// The retraction itself
    TypoRecall,
    /// Gap between the retraction and the corrected resend
    TypoRetypeWait,
}

/// Informative annotations attached to an action.
///
/// Consumers must not depend on any of these for correctness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_segments: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionState>,

    /// Normalized fine emotion signal the message was produced under
    #[serde(default, skip_serializing_if = "EmotionSignal::is_empty")]
    pub emotion_map: EmotionSignal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_typo: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correction: Option<bool>,

    /// Id of the recalled send this correction replaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_for: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ActionReason>,

    /// Segment index a segment-interval pause follows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_segment: Option<usize>,
}

impl ActionMetadata {
    /// Metadata carrying only a reason
    pub fn reason(reason: ActionReason) -> Self {
        Self {
            reason: Some(reason),
            ..Default::default()
        }
    }
}

/// One atomic step of a playback timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,

    /// Message text (send only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Seconds, rounded to milliseconds. Zero for send and recall.
    #[serde(default)]
    pub duration: f64,

    /// Unique id (send only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Id of the send being retracted (recall only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,

    #[serde(default)]
    pub metadata: ActionMetadata,
}

impl PlaybackAction {
    /// Create a send action
    pub fn send(
        text: impl Into<String>,
        message_id: impl Into<String>,
        metadata: ActionMetadata,
    ) -> Self {
        Self {
            action_type: ActionType::Send,
            text: Some(text.into()),
            duration: 0.0,
            message_id: Some(message_id.into()),
            target_id: None,
            metadata,
        }
    }

    /// Create a pause action
    pub fn pause(duration: f64, metadata: ActionMetadata) -> Self {
        Self {
            action_type: ActionType::Pause,
            text: None,
            duration,
            message_id: None,
            target_id: None,
            metadata,
        }
    }

    /// Create a recall action targeting an earlier send
    pub fn recall(target_id: impl Into<String>, metadata: ActionMetadata) -> Self {
        Self {
            action_type: ActionType::Recall,
            text: None,
            duration: 0.0,
            message_id: None,
            target_id: Some(target_id.into()),
            metadata,
        }
    }

    pub fn is_send(&self) -> bool {
        self.action_type == ActionType::Send
    }

    pub fn is_pause(&self) -> bool {
        self.action_type == ActionType::Pause
    }

    pub fn is_recall(&self) -> bool {
        self.action_type == ActionType::Recall
    }
}
