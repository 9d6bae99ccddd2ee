//! WASM API
//!
//! JavaScript-facing entry points.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization and error handling
//! - `export`: Event extraction, MIDI export and generation response handling

pub mod helpers;
pub mod export;

// Re-export all public functions to keep a flat API surface
pub use export::{extract_note_events, generate_midi_from_response, process_generation_response, GeneratedMidi};
