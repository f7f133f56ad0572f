//! Integration tests for the behavior pipeline (text -> playback timeline)

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use chat_behavior_config::constants::segmentation::MAX_SEGMENTS;
use chat_behavior_config::BehaviorConfig;
use chat_behavior_core::{Diagnostic, EmotionSignal, EmotionState, PlaybackAction};
use chat_behavior_engine::{timeline, total_duration, BehaviorCoordinator, MemorySink};

fn signal(entries: &[(&str, &str)]) -> EmotionSignal {
    entries
        .iter()
        .map(|(label, level)| (label.to_string(), level.to_string()))
        .collect()
}

fn send_ids(actions: &[PlaybackAction]) -> Vec<String> {
    actions
        .iter()
        .filter(|a| a.is_send())
        .filter_map(|a| a.message_id.clone())
        .collect()
}

/// Forced typo + recall must produce a recall pointing at an earlier send
#[test]
fn test_forced_typo_is_recalled() {
    let config = BehaviorConfig {
        enable_segmentation: false,
        base_typo_rate: 1.0,
        typo_recall_rate: 1.0,
        ..Default::default()
    };
    let coordinator = BehaviorCoordinator::new(config);

    for _ in 0..20 {
        let actions = coordinator.process_message("这是一个测试消息", None).unwrap();

        let recalls: Vec<&PlaybackAction> = actions.iter().filter(|a| a.is_recall()).collect();
        assert!(!recalls.is_empty());

        for recall in recalls {
            let target = recall.target_id.as_deref().unwrap();
            let recall_pos = actions.iter().position(|a| std::ptr::eq(a, recall)).unwrap();
            let send_pos = actions
                .iter()
                .position(|a| a.message_id.as_deref() == Some(target))
                .unwrap();
            assert!(send_pos < recall_pos);
        }
    }
}

/// With typos off nothing is ever recalled
#[test]
fn test_typo_disabled_never_recalls() {
    let coordinator = BehaviorCoordinator::new(BehaviorConfig {
        enable_typo: false,
        ..Default::default()
    });

    for _ in 0..20 {
        let actions = coordinator
            .process_message("Hello, this is a test message!", None)
            .unwrap();
        assert!(actions.iter().any(|a| a.is_send()));
        assert!(!actions.iter().any(|a| a.is_recall()));
        assert!(actions
            .iter()
            .filter(|a| a.is_send())
            .all(|a| a.metadata.has_typo == Some(false)));
    }
}

#[test]
fn test_empty_input_yields_nothing() {
    let coordinator = BehaviorCoordinator::default();
    assert!(coordinator.process_message("", None).unwrap().is_empty());
    assert!(coordinator.process_message("   \n\t", None).unwrap().is_empty());
}

/// A fixed random source reproduces the timeline byte for byte
#[test]
fn test_seeded_runs_are_identical() {
    let coordinator = BehaviorCoordinator::new(BehaviorConfig {
        base_typo_rate: 0.5,
        typo_recall_rate: 0.5,
        ..Default::default()
    });
    let text = "今天真的好开心！我们去吃火锅吧，好不好？还有，明天见~";
    let emotion = signal(&[("happy", "high"), ("excited", "medium")]);

    let first = coordinator
        .process_message_with_rng(text, Some(&emotion), &mut StdRng::seed_from_u64(2024))
        .unwrap();
    let second = coordinator
        .process_message_with_rng(text, Some(&emotion), &mut StdRng::seed_from_u64(2024))
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

/// Every produced timeline satisfies the assembler's invariants
#[test]
fn test_timelines_are_always_valid() {
    let coordinator = BehaviorCoordinator::new(BehaviorConfig {
        base_typo_rate: 0.7,
        typo_recall_rate: 0.7,
        ..Default::default()
    });
    let texts = [
        "Hi!",
        "***重要*** 明天见。",
        "Part A, part B, part C - and then another clause.",
        "真的吗？！！太好了……好的~~",
        "one\ntwo\nthree\nfour",
    ];

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for text in texts {
            let actions = coordinator
                .process_message_with_rng(text, None, &mut rng)
                .unwrap();
            assert!(timeline::validate(&actions).is_ok());

            let ids = send_ids(&actions);
            let unique: HashSet<&String> = ids.iter().collect();
            assert_eq!(ids.len(), unique.len());

            assert!(actions.last().map_or(true, |a| a.is_send()));
            assert!(total_duration(&actions) >= 0.0);
        }
    }
}

#[test]
fn test_pause_bounds_follow_emotion() {
    let config = BehaviorConfig {
        enable_typo: false,
        min_pause_duration: 1.0,
        max_pause_duration: 2.0,
        ..Default::default()
    };
    let sad = config.pause_multiplier(EmotionState::Sad);
    let coordinator = BehaviorCoordinator::new(config);
    let emotion = signal(&[("sad", "extreme")]);

    let actions = coordinator
        .process_message_with_rng("一。二。三。四。", Some(&emotion), &mut StdRng::seed_from_u64(5))
        .unwrap();

    let pauses: Vec<f64> = actions
        .iter()
        .filter(|a| a.is_pause())
        .map(|a| a.duration)
        .collect();
    assert_eq!(pauses.len(), 3);
    for pause in pauses {
        assert!(pause >= 1.0 * sad - 1e-9 && pause <= 2.0 * sad + 1e-9);
    }
}

#[test]
fn test_excessive_segments_are_truncated_and_reported() {
    let sink = Arc::new(MemorySink::new());
    let coordinator = BehaviorCoordinator::with_diagnostics(
        BehaviorConfig {
            enable_typo: false,
            ..Default::default()
        },
        sink.clone(),
    );

    let text = (0..30).map(|i| format!("第{}句！", i)).collect::<String>();
    let actions = coordinator.process_message(&text, None).unwrap();

    let sends: Vec<&PlaybackAction> = actions.iter().filter(|a| a.is_send()).collect();
    assert_eq!(sends.len(), MAX_SEGMENTS);
    assert!(sends
        .iter()
        .all(|a| a.metadata.total_segments == Some(MAX_SEGMENTS)));

    let reported = sink.take();
    assert_eq!(reported.len(), 1);
    match &reported[0] {
        Diagnostic::ExcessiveSegments { count, limit, .. } => {
            assert_eq!(*count, 30);
            assert_eq!(*limit, MAX_SEGMENTS);
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
    assert!(reported[0].is_input_anomaly());
}

/// One coordinator serves many threads at once
#[test]
fn test_concurrent_callers() {
    let coordinator = Arc::new(BehaviorCoordinator::new(BehaviorConfig {
        base_typo_rate: 0.5,
        typo_recall_rate: 1.0,
        ..Default::default()
    }));

    thread::scope(|scope| {
        for worker in 0..8u64 {
            let coordinator = Arc::clone(&coordinator);
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(worker);
                for _ in 0..25 {
                    let actions = coordinator
                        .process_message_with_rng("你好，很高兴认识你！今天过得怎么样？", None, &mut rng)
                        .unwrap();
                    assert!(timeline::validate(&actions).is_ok());
                }
            });
        }

        scope.spawn(|| {
            coordinator
                .update_config(BehaviorConfig {
                    enable_typo: false,
                    ..Default::default()
                })
                .unwrap();
        });
    });

    assert!(!coordinator.config().enable_typo);
}

#[test]
fn test_resolved_emotion_accessor() {
    let coordinator = BehaviorCoordinator::default();
    let emotion = signal(&[("happy", "medium"), ("excited", "high"), ("sad", "low")]);
    assert_eq!(coordinator.resolve_emotion(Some(&emotion)), EmotionState::Excited);
    assert_eq!(
        coordinator.resolve_emotion(Some(&signal(&[("unknown", "mid")]))),
        EmotionState::Neutral
    );
    assert_eq!(
        coordinator.resolve_emotion(Some(&signal(&[("surprised", "high")]))),
        EmotionState::Excited
    );
}

#[test]
fn test_timeline_json_contract() {
    let coordinator = BehaviorCoordinator::new(BehaviorConfig {
        enable_segmentation: false,
        base_typo_rate: 1.0,
        typo_recall_rate: 1.0,
        ..Default::default()
    });
    let actions = coordinator
        .process_message_with_rng("hello there", None, &mut StdRng::seed_from_u64(3))
        .unwrap();
    let json = serde_json::to_value(&actions).unwrap();

    let types: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["send", "pause", "recall", "pause", "send"]);
    assert_eq!(json[1]["metadata"]["reason"], "typo_recall_delay");
    assert_eq!(json[2]["metadata"]["reason"], "typo_recall");
    assert_eq!(json[3]["metadata"]["reason"], "typo_retype_wait");
    assert_eq!(json[4]["metadata"]["is_correction"], true);
    assert_eq!(json[4]["metadata"]["correction_for"], json[0]["message_id"]);
    assert_eq!(json[4]["text"], "hello there");
}
