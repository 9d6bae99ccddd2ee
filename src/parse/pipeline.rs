//! Extraction pipeline
//!
//! raw response → fence strip → event call extractor → field validator.
//!
//! Malformed calls are dropped and counted. The pipeline only fails when no
//! call at all survives, because an empty track is never a usable result.

use serde::Serialize;

use crate::models::ValidatedEvent;
use crate::parse::errors::{ExtractError, ExtractResult, SkipReason};
use crate::parse::extractor::event_calls;
use crate::parse::fields::build_event;
use crate::parse::preclean::strip_code_fences;

/// A call that was located but failed field validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCall {
    /// Byte offset of the call in the fence-stripped text
    pub offset: usize,
    pub reason: SkipReason,
}

/// Events recovered from one model response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Validated events in source order (never empty)
    pub events: Vec<ValidatedEvent>,

    /// Number of calls dropped by validation
    pub skipped: usize,

    /// Why each dropped call was dropped, in source order
    pub skipped_calls: Vec<SkippedCall>,
}

impl ExtractionResult {
    /// True when at least one call was dropped
    pub fn is_partial(&self) -> bool {
        self.skipped > 0
    }
}

/// Extract validated note events from an untrusted model response
///
/// # Errors
/// `ExtractError::EmptyResult` when the response holds no event calls, or
/// when every call fails validation.
pub fn extract_events(raw: &str) -> ExtractResult<ExtractionResult> {
    let text = strip_code_fences(raw);

    let mut events = Vec::new();
    let mut skipped_calls = Vec::new();

    for occurrence in event_calls(&text) {
        match build_event(occurrence.args) {
            Ok(event) => events.push(event),
            Err(reason) => {
                log::debug!("Skipping event call at byte {}: {}", occurrence.offset, reason);
                skipped_calls.push(SkippedCall {
                    offset: occurrence.offset,
                    reason,
                });
            }
        }
    }

    let skipped = skipped_calls.len();

    if events.is_empty() {
        log::warn!("No usable note events in response ({} malformed calls)", skipped);
        return Err(ExtractError::EmptyResult { skipped });
    }

    if skipped > 0 {
        log::warn!("Dropped {} malformed note events, kept {}", skipped, events.len());
    }
    log::info!("Extracted {} note events", events.len());

    Ok(ExtractionResult {
        events,
        skipped,
        skipped_calls,
    })
}
