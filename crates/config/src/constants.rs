//! Centralized constants for the chat behavior engine
//!
//! Single source of truth for defaults and fixed limits. Config structs take
//! their serde defaults from here.

/// Segmentation limits and character sets
pub mod segmentation {
    /// Ceiling on chunks per message; anything beyond is truncated
    pub const MAX_SEGMENTS: usize = 20;

    /// Default hard cap on chunk length (characters) before a forced cut
    pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 60;

    /// Characters that close a chunk (sentence and clause terminators)
    pub const DEFAULT_SPLIT_TRIGGERS: &str = "。！？!?，,；;：:\n~～….";

    /// Dashes count as symbols but never split
    pub const DASH_CHARS: &str = "—–-－";

    /// Comma-class marks stripped when a chunk ends in exactly one of them
    pub const SOFT_TRAILING_PUNCTUATION: &[char] = &[',', '，', '、', '。'];
}

/// Typo injection and recall defaults
pub mod typo {
    /// Chunks shorter than this (in characters) are never corrupted
    pub const MIN_TYPO_LENGTH: usize = 2;

    pub const DEFAULT_BASE_TYPO_RATE: f64 = 0.08;
    pub const DEFAULT_RECALL_RATE: f64 = 0.4;

    /// Seconds between a typo'd send and its recall
    pub const DEFAULT_RECALL_DELAY: f64 = 1.2;

    /// Seconds between a recall and the corrected resend
    pub const DEFAULT_RETYPE_DELAY: f64 = 0.8;
}

/// Inter-segment pause defaults (seconds)
pub mod pause {
    pub const DEFAULT_MIN_DURATION: f64 = 0.4;
    pub const DEFAULT_MAX_DURATION: f64 = 2.5;

    /// Ceiling on any single sampled pause, whatever the configuration
    pub const MAX_INTERVAL_SECS: f64 = 3600.0;
}

/// Remote segmentation service
pub mod mini_model {
    pub const DEFAULT_TIMEOUT_SECS: f64 = 2.0;
}

/// Environment variable layout for `load_settings`
pub mod env {
    pub const PREFIX: &str = "CHAT_BEHAVIOR";
    pub const SEPARATOR: &str = "__";
    /// Selects `config/{env}` on top of `config/default`
    pub const ENV_SELECTOR: &str = "CHAT_BEHAVIOR_ENV";
}
