//! Parsing module
//!
//! Turns an untrusted model response into validated note events using
//! structural text matching only.

pub mod errors;
pub mod preclean;
pub mod extractor;
pub mod fields;
pub mod pipeline;

// Re-export commonly used types
pub use errors::{ExtractError, ExtractResult, SkipReason};
pub use extractor::{event_calls, EventCallOccurrence, EventCalls, EVENT_CALL_PREFIX};
pub use fields::build_event;
pub use pipeline::{extract_events, ExtractionResult, SkippedCall};
pub use preclean::strip_code_fences;
