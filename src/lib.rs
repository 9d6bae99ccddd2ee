//! MidiGenius WASM Module
//!
//! Turns a generative model's free-text answer into a downloadable MIDI file.
//! The answer is untrusted: note events are recovered by structural text
//! matching (see `parse`), never by evaluating the text as code.

pub mod models;
pub mod parse;
pub mod renderers;
pub mod generate;
pub mod api;

// Re-export commonly used types
pub use models::{DurationCode, PitchSet, ValidatedEvent};
pub use parse::{extract_events, ExtractError, ExtractionResult, SkipReason};
pub use renderers::midi::{events_to_midi, EncodeSettings, MidiError};
pub use generate::{compose, compose_from_text, Composition, GenerateError, GenerationResponse};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logger();

    log::info!("MidiGenius WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logger() {
    // Fails only if a logger is already installed (module re-initialized)
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("Logger already initialized: {}", e);
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logger() {}
