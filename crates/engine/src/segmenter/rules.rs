//! Rule-based segmenter
//!
//! Scans the reply character by character with an accumulation buffer:
//! - A symbol run at the start of an empty buffer becomes its own chunk, so
//!   decorative punctuation is not glued to the following sentence
//! - A split trigger closes the buffer, taking any symbol run right after it
//!   along (trailing "!!!" or "？！" stays with its sentence)
//! - A buffer that reaches `max_length` characters is force-cut the same way
//!
//! Chunks are contiguous slices of the input, trimmed; whitespace-only
//! chunks are dropped.

use std::collections::HashSet;
use std::iter::FusedIterator;

use chat_behavior_config::constants::segmentation::{
    DEFAULT_MAX_SEGMENT_LENGTH, DEFAULT_SPLIT_TRIGGERS,
};
use chat_behavior_config::BehaviorConfig;
use chat_behavior_core::{Result, Segmenter};

use super::charclass::{is_dash, is_symbol};

/// Punctuation-driven segmenter; never fails
#[derive(Debug, Clone)]
pub struct RuleBasedSegmenter {
    max_length: usize,
    triggers: HashSet<char>,
}

impl Default for RuleBasedSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEGMENT_LENGTH)
    }
}

impl RuleBasedSegmenter {
    /// Create with the default trigger set
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
            triggers: DEFAULT_SPLIT_TRIGGERS.chars().collect(),
        }
    }

    /// Replace the split-trigger set. Dashes are ignored even if listed.
    pub fn with_triggers(mut self, triggers: &str) -> Self {
        self.triggers = triggers.chars().collect();
        self
    }

    pub fn from_config(config: &BehaviorConfig) -> Self {
        let segmenter = Self::new(config.max_segment_length);
        match config.split_triggers.as_deref() {
            Some(triggers) if !triggers.is_empty() => segmenter.with_triggers(triggers),
            _ => segmenter,
        }
    }

    fn is_trigger(&self, c: char) -> bool {
        !is_dash(c) && self.triggers.contains(&c)
    }

    /// Lazily iterate over the chunks of `text`
    pub fn segments<'a>(&'a self, text: &'a str) -> Segments<'a> {
        Segments {
            rules: self,
            text,
            pos: 0,
        }
    }
}

impl Segmenter for RuleBasedSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.segments(text).map(str::to_string).collect())
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Iterator over the chunks of one input
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rules: &'a RuleBasedSegmenter,
    text: &'a str,
    /// Byte offset of the first unscanned character
    pos: usize,
}

impl<'a> Segments<'a> {
    /// Byte offset just past the symbol run starting at `from`
    fn symbol_run_end(&self, from: usize) -> usize {
        self.text[from..]
            .char_indices()
            .find(|(_, c)| !is_symbol(*c))
            .map_or(self.text.len(), |(offset, _)| from + offset)
    }

    /// Byte offset where the raw chunk starting at `start` ends
    fn chunk_end(&self, start: usize) -> usize {
        let mut buffered = 0usize;
        for (offset, c) in self.text[start..].char_indices() {
            if buffered == 0 && is_symbol(c) {
                return self.symbol_run_end(start + offset);
            }
            buffered += 1;
            if self.rules.is_trigger(c) || buffered >= self.rules.max_length {
                return self.symbol_run_end(start + offset + c.len_utf8());
            }
        }
        self.text.len()
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let start = self.pos;
            self.pos = self.chunk_end(start);
            let chunk = self.text[start..self.pos].trim();
            if !chunk.is_empty() {
                return Some(chunk);
            }
        }
        None
    }
}

impl FusedIterator for Segments<'_> {}
