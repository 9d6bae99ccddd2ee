//! Validated-events-to-MIDI export
//!
//! Thin adapter over `midly`: events become a lean Score IR, and the Score is
//! serialized as a Standard MIDI File (format 1, conductor track plus one
//! note track). Pitch spelling and duration codes are checked here, not in
//! the extraction pipeline.
//!
//! # Usage
//! ```rust,ignore
//! use midigenius_wasm::parse::extract_events;
//! use midigenius_wasm::renderers::midi::{events_to_midi, EncodeSettings};
//!
//! let extracted = extract_events(&response_text)?;
//! let bytes = events_to_midi(&extracted.events, &EncodeSettings::default())?;
//! ```

pub mod converter;
pub mod defaults;
mod model;
pub mod settings;
mod write;

pub use converter::events_to_score;
pub use defaults::{DEFAULT_TEMPO_BPM, DEFAULT_VELOCITY, DEFAULT_PROGRAM, DEFAULT_TPQ, MIDI_FILE_NAME};
pub use model::*;
pub use settings::EncodeSettings;
pub use write::write_smf;

use crate::models::ValidatedEvent;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MidiError {
    #[error("unsupported duration code: '{0}'")]
    UnsupportedDuration(String),
    #[error("unsupported pitch: '{0}'")]
    UnsupportedPitch(String),
    #[error("invalid encode settings: {0}")]
    InvalidSettings(String),
    #[error("midi write error: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, MidiError>;

/// Convert validated events to SMF (Standard MIDI File) bytes
///
/// # Arguments
/// * `events` - Validated events in playback order
/// * `settings` - Resolution, tempo and track options
///
/// # Returns
/// * MIDI file bytes ready for download
pub fn events_to_midi(events: &[ValidatedEvent], settings: &EncodeSettings) -> Result<Vec<u8>> {
    let score = events_to_score(events, settings)?;
    log::debug!(
        "MIDI Score: {} notes over {} ticks",
        score.note_count(),
        score.end_tick()
    );

    let mut out = Vec::new();
    write_smf(&score, &mut out)?;
    Ok(out)
}
