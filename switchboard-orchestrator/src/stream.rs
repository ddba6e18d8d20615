//! Streaming response chunks.
//!
//! `stream_query` yields an ordered, finite, non-restartable sequence:
//! one empty processing chunk, one intent chunk, one chunk per completed
//! phase, and a final complete chunk. Any failure ends the stream with a
//! single error chunk. A consumer that stops reading simply abandons the
//! remaining work.

use serde::{Deserialize, Serialize};
use switchboard_core::{IntentKind, ProcessingStats, UnifiedResponse, UnifiedResult};

/// Error code for failures surfaced on the streaming path.
pub const STREAM_ERROR: &str = "STREAM_ERROR";
/// Error code for failures surfaced on the request/response path.
pub const ORCHESTRATION_ERROR: &str = "ORCHESTRATION_ERROR";

/// Fixed confidence reported with the intent chunk.
pub const STREAM_INTENT_CONFIDENCE: f32 = 0.5;
/// Fixed confidence reported with each phase chunk.
pub const STREAM_PHASE_CONFIDENCE: f32 = 0.7;

/// One partial response in the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseChunk {
    /// Initial chunk: processing has started, stats still empty.
    Processing { stats: ProcessingStats },
    /// The utterance has been classified.
    Intent { kind: IntentKind, confidence: f32 },
    /// One phase completed with its result set.
    Phase {
        phase_id: String,
        results: Vec<UnifiedResult>,
        confidence: f32,
    },
    /// Terminal chunk: the full response, equal to `process_query`'s.
    Complete { response: UnifiedResponse },
    /// Terminal chunk: the stream failed.
    Error {
        code: String,
        message: String,
        recoverable: bool,
    },
}

impl ResponseChunk {
    /// Whether this chunk ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResponseChunk::Complete { .. } | ResponseChunk::Error { .. }
        )
    }
}
