//! Renderers module
//!
//! Export logic for turning validated note events into output formats.

pub mod midi;

// Re-export commonly used types
pub use midi::{events_to_midi, EncodeSettings, MidiError};
