//! Remote ("mini-model") segmenter
//!
//! POSTs `{"text": ...}` to an HTTP endpoint and expects
//! `{"segments": [...]}` back. Any failure is returned as an error; wrap it
//! in [`FallbackSegmenter`](super::FallbackSegmenter) to stay fail-soft.
//!
//! Uses the blocking reqwest client, so it must not be called from inside
//! an async runtime's worker thread.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use chat_behavior_core::{Error, Result, Segmenter};

#[derive(Serialize)]
struct SegmentRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct SegmentResponse {
    segments: Option<Vec<serde_json::Value>>,
}

/// HTTP-backed segmentation strategy
pub struct RemoteSegmenter {
    client: Client,
    endpoint: String,
}

impl RemoteSegmenter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Segmentation(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Segmenter for RemoteSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SegmentRequest { text })
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Segmentation(format!("mini model request failed: {}", e)))?;

        let payload: SegmentResponse = response
            .json()
            .map_err(|e| Error::Segmentation(format!("invalid mini model response: {}", e)))?;

        let segments = payload.segments.ok_or_else(|| {
            Error::Segmentation("mini model response missing 'segments' list".to_string())
        })?;

        let cleaned = clean_segments(segments);
        if cleaned.is_empty() {
            return Err(Error::Segmentation(
                "mini model returned no usable segments".to_string(),
            ));
        }

        Ok(cleaned)
    }

    fn name(&self) -> &'static str {
        "mini_model"
    }
}

/// Stringify, trim and drop empty entries
fn clean_segments(raw: Vec<serde_json::Value>) -> Vec<String> {
    raw.into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
