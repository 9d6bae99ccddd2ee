//! Error types for note event extraction
//!
//! Per-call problems (`SkipReason`) are absorbed by the pipeline and only
//! counted. The one fatal outcome is `ExtractError::EmptyResult`.

use serde::Serialize;
use thiserror::Error;

/// Why a single event call was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No `pitch:` field was found in the call arguments
    #[error("missing pitch field")]
    MissingPitch,

    /// The pitch field was present but held no usable literal tokens
    #[error("pitch list is empty")]
    EmptyPitchList,

    /// No quoted `duration:` field was found in the call arguments
    #[error("missing duration field")]
    MissingDuration,
}

/// Fatal extraction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// No event call survived validation (or the response held none at all)
    #[error("AI failed to generate a valid response ({skipped} malformed note events). Please try a different prompt.")]
    EmptyResult { skipped: usize },
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
