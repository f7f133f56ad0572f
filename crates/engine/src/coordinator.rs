//! Behavior coordinator
//!
//! Turns one agent reply into a playback timeline:
//! 1. Resolve the coarse emotion once per message
//! 2. Segment, normalize trailing punctuation, bound the chunk count
//! 3. Per chunk: maybe corrupt, send, maybe recall and resend, pause
//! 4. Validate the assembled timeline
//!
//! The coordinator holds only an immutable configuration snapshot and
//! stateless components, so one instance can serve concurrent callers.

use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;

use chat_behavior_config::constants::segmentation::MAX_SEGMENTS;
use chat_behavior_config::BehaviorConfig;
use chat_behavior_core::{
    normalize_signal, ActionMetadata, ActionReason, Diagnostic, DiagnosticSink, EmotionSignal,
    EmotionState, PlaybackAction, Result, Segmenter,
};

use crate::diagnostics::TracingSink;
use crate::emotion::EmotionFetcher;
use crate::ids::MessageIds;
use crate::pause::{round_millis, PausePredictor};
use crate::segmenter::{build_segmenter, trim_trailing_punctuation};
use crate::timeline::TimelineBuilder;
use crate::typo::{Typo, TypoInjector};

/// Characters of input echoed into an excessive-segmentation diagnostic
const PREVIEW_CHARS: usize = 50;

/// Components bound to one configuration snapshot
struct Pipeline {
    config: Arc<BehaviorConfig>,
    segmenter: Arc<dyn Segmenter>,
    emotion: EmotionFetcher,
    typo: TypoInjector,
    pause: PausePredictor,
    timeline: TimelineBuilder,
}

impl Pipeline {
    fn new(
        config: BehaviorConfig,
        custom_segmenter: Option<Arc<dyn Segmenter>>,
        sink: &Arc<dyn DiagnosticSink>,
    ) -> Self {
        let segmenter =
            custom_segmenter.unwrap_or_else(|| Arc::from(build_segmenter(&config, sink.clone())));
        Self {
            emotion: EmotionFetcher::from_config(&config),
            pause: PausePredictor::from_config(&config),
            typo: TypoInjector::new(),
            timeline: TimelineBuilder::new(),
            segmenter,
            config: Arc::new(config),
        }
    }
}

/// Per-message state shared by every chunk
struct MessageContext<'a> {
    emotion: EmotionState,
    signal: &'a EmotionSignal,
    total_segments: usize,
    ids: MessageIds,
}

impl MessageContext<'_> {
    fn segment_metadata(&self, segment_index: usize) -> ActionMetadata {
        ActionMetadata {
            segment_index: Some(segment_index),
            total_segments: Some(self.total_segments),
            emotion: Some(self.emotion),
            emotion_map: self.signal.clone(),
            ..Default::default()
        }
    }
}

/// Orchestrates segmentation, typos, recalls and pauses
pub struct BehaviorCoordinator {
    pipeline: RwLock<Arc<Pipeline>>,
    custom_segmenter: Option<Arc<dyn Segmenter>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for BehaviorCoordinator {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}

impl BehaviorCoordinator {
    /// Create a coordinator reporting diagnostics through `tracing`
    pub fn new(config: BehaviorConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingSink))
    }

    /// Create a coordinator with an explicit diagnostic sink
    pub fn with_diagnostics(config: BehaviorConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        let pipeline = Pipeline::new(config, None, &sink);
        Self {
            pipeline: RwLock::new(Arc::new(pipeline)),
            custom_segmenter: None,
            sink,
        }
    }

    /// Replace the configured segmentation strategy. Kept across
    /// `update_config`.
    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        let config = self.config().as_ref().clone();
        self.custom_segmenter = Some(segmenter);
        self.pipeline = RwLock::new(Arc::new(Pipeline::new(
            config,
            self.custom_segmenter.clone(),
            &self.sink,
        )));
        self
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<BehaviorConfig> {
        self.pipeline.read().config.clone()
    }

    /// Validate and swap in a new configuration. Calls already running
    /// finish with the snapshot they started with; a rejected config leaves
    /// the current one in place.
    pub fn update_config(&self, config: BehaviorConfig) -> Result<()> {
        config.validate()?;
        let pipeline = Pipeline::new(config, self.custom_segmenter.clone(), &self.sink);
        tracing::info!(
            segmenter = pipeline.segmenter.name(),
            max_segment_length = pipeline.config.max_segment_length,
            "Behavior configuration updated"
        );
        *self.pipeline.write() = Arc::new(pipeline);
        Ok(())
    }

    fn snapshot(&self) -> Arc<Pipeline> {
        self.pipeline.read().clone()
    }

    /// Coarse emotion for a fine signal under the current configuration
    pub fn resolve_emotion(&self, signal: Option<&EmotionSignal>) -> EmotionState {
        let pipeline = self.snapshot();
        let signal = signal.map(normalize_signal).unwrap_or_default();
        Self::emotion_for(&pipeline, &signal)
    }

    fn emotion_for(pipeline: &Pipeline, signal: &EmotionSignal) -> EmotionState {
        if pipeline.config.enable_emotion_fetch {
            pipeline.emotion.fetch(signal)
        } else {
            EmotionState::Neutral
        }
    }

    /// Build the playback timeline for `text` using the thread-local RNG
    pub fn process_message(
        &self,
        text: &str,
        signal: Option<&EmotionSignal>,
    ) -> Result<Vec<PlaybackAction>> {
        self.process_message_with_rng(text, signal, &mut rand::thread_rng())
    }

    /// Build the playback timeline drawing every random decision (typos,
    /// recalls, pauses, ids) from `rng`
    pub fn process_message_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        signal: Option<&EmotionSignal>,
        rng: &mut R,
    ) -> Result<Vec<PlaybackAction>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let pipeline = self.snapshot();
        let signal = signal.map(normalize_signal).unwrap_or_default();
        let emotion = Self::emotion_for(&pipeline, &signal);

        let chunks = self.split(&pipeline, text);
        let mut context = MessageContext {
            emotion,
            signal: &signal,
            total_segments: chunks.len(),
            ids: MessageIds::new(rng),
        };

        let mut actions = Vec::with_capacity(chunks.len() * 2);
        for (index, chunk) in chunks.iter().enumerate() {
            self.push_segment(&pipeline, &mut context, index, chunk, rng, &mut actions);
        }

        tracing::debug!(
            segments = context.total_segments,
            emotion = %emotion,
            actions = actions.len(),
            segmenter = pipeline.segmenter.name(),
            "Built playback timeline"
        );

        pipeline.timeline.build_timeline(actions)
    }

    /// Segment and normalize, applying the empty and excessive fallbacks
    fn split(&self, pipeline: &Pipeline, text: &str) -> Vec<String> {
        let raw = if pipeline.config.enable_segmentation {
            match pipeline.segmenter.segment(text) {
                Ok(chunks) => chunks,
                Err(err) => {
                    tracing::warn!(error = %err, "Segmentation failed, sending text as one message");
                    vec![text.to_string()]
                }
            }
        } else {
            vec![text.to_string()]
        };

        let mut chunks: Vec<String> = raw
            .iter()
            .map(|chunk| trim_trailing_punctuation(chunk.trim()))
            .filter(|chunk| !chunk.is_empty())
            .map(str::to_string)
            .collect();

        if chunks.is_empty() {
            let whole = trim_trailing_punctuation(text);
            self.sink.report(Diagnostic::EmptyAfterNormalization {
                fallback_used: !whole.is_empty(),
            });
            if !whole.is_empty() {
                chunks.push(whole.to_string());
            }
        }

        if chunks.len() > MAX_SEGMENTS {
            self.sink.report(Diagnostic::ExcessiveSegments {
                count: chunks.len(),
                limit: MAX_SEGMENTS,
                preview: text.chars().take(PREVIEW_CHARS).collect(),
            });
            chunks.truncate(MAX_SEGMENTS);
        }

        chunks
    }

    fn push_segment<R: Rng + ?Sized>(
        &self,
        pipeline: &Pipeline,
        context: &mut MessageContext<'_>,
        index: usize,
        chunk: &str,
        rng: &mut R,
        actions: &mut Vec<PlaybackAction>,
    ) {
        let config = &pipeline.config;

        let typo = if config.enable_typo {
            let rate = config.base_typo_rate * config.typo_multiplier(context.emotion);
            pipeline.typo.inject_typo(chunk, rate, rng)
        } else {
            None
        };

        let message_id = context.ids.next_id();
        let send_text = typo.as_ref().map_or(chunk, |typo| typo.text.as_str());
        actions.push(PlaybackAction::send(
            send_text,
            message_id.clone(),
            ActionMetadata {
                has_typo: Some(typo.is_some()),
                ..context.segment_metadata(index)
            },
        ));

        if let Some(typo) = &typo {
            if config.enable_recall && pipeline.typo.should_recall_typo(config.typo_recall_rate, rng) {
                self.push_recall(pipeline, context, index, chunk, typo, &message_id, actions);
            }
        }

        if index + 1 < context.total_segments {
            let interval = pipeline.pause.segment_interval(
                context.emotion,
                config.min_pause_duration,
                config.max_pause_duration,
                rng,
            );
            actions.push(PlaybackAction::pause(
                interval,
                ActionMetadata {
                    reason: Some(ActionReason::SegmentInterval),
                    from_segment: Some(index),
                    emotion: Some(context.emotion),
                    ..Default::default()
                },
            ));
        }
    }

    /// pause(recall_delay) -> recall -> pause(retype_delay) -> corrected send
    #[allow(clippy::too_many_arguments)]
    fn push_recall(
        &self,
        pipeline: &Pipeline,
        context: &mut MessageContext<'_>,
        index: usize,
        original: &str,
        typo: &Typo,
        typo_id: &str,
        actions: &mut Vec<PlaybackAction>,
    ) {
        let config = &pipeline.config;

        tracing::trace!(
            segment = index,
            position = typo.position,
            original = %typo.original,
            replacement = %typo.replacement,
            "Recalling typo"
        );

        if let Some(delay) = positive_delay(config.recall_delay) {
            actions.push(PlaybackAction::pause(
                delay,
                ActionMetadata::reason(ActionReason::TypoRecallDelay),
            ));
        }

        actions.push(PlaybackAction::recall(
            typo_id,
            ActionMetadata::reason(ActionReason::TypoRecall),
        ));

        if let Some(delay) = positive_delay(config.retype_delay) {
            actions.push(PlaybackAction::pause(
                delay,
                ActionMetadata::reason(ActionReason::TypoRetypeWait),
            ));
        }

        actions.push(PlaybackAction::send(
            original,
            context.ids.next_id(),
            ActionMetadata {
                has_typo: Some(false),
                is_correction: Some(true),
                correction_for: Some(typo_id.to_string()),
                ..context.segment_metadata(index)
            },
        ));
    }
}

/// Fixed delay rounded to milliseconds; `None` when it would be empty
fn positive_delay(seconds: f64) -> Option<f64> {
    let rounded = round_millis(seconds);
    (rounded.is_finite() && rounded > 0.0).then_some(rounded)
}
