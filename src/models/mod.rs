//! Models module
//!
//! Data types for validated note events, plus the pitch and duration
//! lookups the MIDI encoder applies to them.

pub mod event;
pub mod pitch;
pub mod duration;

// Re-export commonly used types
pub use event::{DurationCode, PitchSet, ValidatedEvent};
pub use pitch::pitch_token_to_midi;
pub use duration::duration_code_to_ticks;
