//! Timeline assembler
//!
//! Final gate between the coordinator and the transport: checks every
//! ordering and identity invariant and hands the sequence back unchanged.
//! A violation means the coordinator is broken, so it is a hard error and
//! is never repaired.

use std::collections::HashSet;

use chat_behavior_core::{ActionType, PlaybackAction, Result, TimelineViolation};

/// Validates assembled action lists
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineBuilder;

impl TimelineBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validate and return the sequence untouched
    pub fn build_timeline(&self, actions: Vec<PlaybackAction>) -> Result<Vec<PlaybackAction>> {
        validate(&actions)?;
        Ok(actions)
    }
}

/// Check timeline invariants:
/// - every send has text and an id unique within the sequence
/// - pauses and recalls carry no message id
/// - every recall targets an earlier send
/// - durations are finite and non-negative; only pauses take time
pub fn validate(actions: &[PlaybackAction]) -> std::result::Result<(), TimelineViolation> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, action) in actions.iter().enumerate() {
        if !action.duration.is_finite() || action.duration < 0.0 {
            return Err(TimelineViolation::InvalidDuration {
                index,
                duration: action.duration,
            });
        }

        if !action.is_pause() && action.duration != 0.0 {
            return Err(TimelineViolation::UnexpectedDuration {
                index,
                action: if action.is_send() { "send" } else { "recall" },
                duration: action.duration,
            });
        }

        match action.action_type {
            ActionType::Send => {
                if action.text.is_none() {
                    return Err(TimelineViolation::MissingText { index });
                }
                let id = action
                    .message_id
                    .as_deref()
                    .ok_or(TimelineViolation::MissingMessageId { index })?;
                if !seen.insert(id) {
                    return Err(TimelineViolation::DuplicateMessageId {
                        index,
                        id: id.to_string(),
                    });
                }
            }
            ActionType::Pause | ActionType::Recall => {
                if action.message_id.is_some() {
                    return Err(TimelineViolation::UnexpectedMessageId {
                        index,
                        action: if action.is_pause() { "pause" } else { "recall" },
                    });
                }
                if action.is_recall() {
                    let target = action
                        .target_id
                        .as_deref()
                        .ok_or(TimelineViolation::MissingRecallTarget { index })?;
                    if !seen.contains(target) {
                        return Err(TimelineViolation::DanglingRecall {
                            index,
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

/// Playback length in seconds: the sum of all pauses
pub fn total_duration(actions: &[PlaybackAction]) -> f64 {
    let total: f64 = actions
        .iter()
        .filter(|action| action.is_pause())
        .map(|action| action.duration)
        .sum();
    crate::pause::round_millis(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_behavior_core::{ActionMetadata, ActionReason, Error};

    fn send(text: &str, id: &str) -> PlaybackAction {
        PlaybackAction::send(text, id, ActionMetadata::default())
    }

    fn pause(duration: f64) -> PlaybackAction {
        PlaybackAction::pause(duration, ActionMetadata::reason(ActionReason::SegmentInterval))
    }

    fn recall(target: &str) -> PlaybackAction {
        PlaybackAction::recall(target, ActionMetadata::reason(ActionReason::TypoRecall))
    }

    #[test]
    fn test_valid_timeline_passes_unchanged() {
        let actions = vec![
            send("helo", "a"),
            pause(1.2),
            recall("a"),
            pause(0.8),
            send("hello", "b"),
            pause(0.5),
            send("world", "c"),
        ];
        let built = TimelineBuilder::new().build_timeline(actions.clone()).unwrap();
        assert_eq!(built, actions);
        assert_eq!(total_duration(&built), 2.5);
    }

    #[test]
    fn test_empty_timeline_is_valid() {
        assert!(TimelineBuilder::new().build_timeline(Vec::new()).unwrap().is_empty());
        assert_eq!(total_duration(&[]), 0.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = TimelineBuilder::new()
            .build_timeline(vec![send("a", "x"), send("b", "x")])
            .unwrap_err();
        assert_eq!(
            err,
            Error::Timeline(TimelineViolation::DuplicateMessageId {
                index: 1,
                id: "x".to_string()
            })
        );
    }

    #[test]
    fn test_recall_must_follow_its_target() {
        assert_eq!(
            validate(&[recall("a"), send("a", "a")]),
            Err(TimelineViolation::DanglingRecall {
                index: 0,
                target: "a".to_string()
            })
        );

        let mut untargeted = recall("a");
        untargeted.target_id = None;
        assert_eq!(
            validate(&[send("a", "a"), untargeted]),
            Err(TimelineViolation::MissingRecallTarget { index: 1 })
        );
    }

    #[test]
    fn test_bad_durations_rejected() {
        assert!(matches!(
            validate(&[pause(-0.1)]),
            Err(TimelineViolation::InvalidDuration { index: 0, .. })
        ));
        assert!(matches!(
            validate(&[pause(f64::NAN)]),
            Err(TimelineViolation::InvalidDuration { index: 0, .. })
        ));
    }

    #[test]
    fn test_only_pauses_take_time() {
        let mut slow_recall = recall("a");
        slow_recall.duration = 0.5;
        assert_eq!(
            validate(&[send("a", "a"), slow_recall]),
            Err(TimelineViolation::UnexpectedDuration {
                index: 1,
                action: "recall",
                duration: 0.5
            })
        );

        let mut slow_send = send("a", "a");
        slow_send.duration = 1.0;
        assert!(matches!(
            validate(&[slow_send]),
            Err(TimelineViolation::UnexpectedDuration { index: 0, action: "send", .. })
        ));
    }

    #[test]
    fn test_malformed_sends_and_pauses_rejected() {
        let mut no_id = send("a", "a");
        no_id.message_id = None;
        assert_eq!(
            validate(&[no_id]),
            Err(TimelineViolation::MissingMessageId { index: 0 })
        );

        let mut no_text = send("a", "a");
        no_text.text = None;
        assert_eq!(
            validate(&[no_text]),
            Err(TimelineViolation::MissingText { index: 0 })
        );

        let mut tagged_pause = pause(0.5);
        tagged_pause.message_id = Some("p".to_string());
        assert_eq!(
            validate(&[tagged_pause]),
            Err(TimelineViolation::UnexpectedMessageId {
                index: 0,
                action: "pause"
            })
        );
    }
}
