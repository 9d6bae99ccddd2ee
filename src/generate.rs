//! Model response to downloadable MIDI
//!
//! Entry points for one generation request. The upstream model answers with a
//! structured `{ description, midiData }` object; `midiData` is untrusted text
//! that goes through the extraction pipeline, and the surviving events are
//! encoded as a MIDI file. The description is passed through unvalidated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ValidatedEvent;
use crate::parse::{extract_events, ExtractError};
use crate::renderers::midi::{events_to_midi, EncodeSettings, MidiError, MIDI_FILE_NAME};

/// Top-level error for one generation request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("There was an error creating the MIDI file from the generated notes: {0}")]
    Encode(#[from] MidiError),
}

/// Structured output of the generative model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    /// One-paragraph description of the piece
    #[serde(default)]
    pub description: Option<String>,

    /// Note event calls, possibly wrapped in prose or a code fence
    #[serde(default)]
    pub midi_data: Option<String>,
}

impl GenerationResponse {
    /// Decode the model's JSON output
    ///
    /// A response that is not valid JSON carries no usable events, so it is
    /// reported the same way as an empty extraction.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json).map_err(|e| {
            log::warn!("Malformed generation response: {}", e);
            ExtractError::EmptyResult { skipped: 0 }
        })
    }
}

/// A finished generation: description, events and the encoded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub description: String,
    pub events: Vec<ValidatedEvent>,
    /// Event calls dropped as malformed
    pub skipped: usize,
    #[serde(skip)]
    pub midi: Vec<u8>,
}

impl Composition {
    /// File name offered for download
    pub fn file_name(&self) -> &'static str {
        MIDI_FILE_NAME
    }
}

/// Build a composition from the model's structured response
///
/// A missing or blank `midiData` or `description` means the model did not
/// follow its output schema; that is reported as an empty result rather than
/// attempting a partial extraction.
pub fn compose(
    response: &GenerationResponse,
    settings: &EncodeSettings,
) -> Result<Composition, GenerateError> {
    let midi_data = non_blank(response.midi_data.as_deref());
    let description = non_blank(response.description.as_deref());

    let (Some(midi_data), Some(description)) = (midi_data, description) else {
        log::warn!(
            "Generation response incomplete (midiData: {}, description: {})",
            midi_data.is_some(),
            description.is_some()
        );
        return Err(ExtractError::EmptyResult { skipped: 0 }.into());
    };

    compose_from_text(midi_data, Some(description), settings)
}

/// Build a composition from raw response text and an optional description
pub fn compose_from_text(
    raw: &str,
    description: Option<&str>,
    settings: &EncodeSettings,
) -> Result<Composition, GenerateError> {
    let extracted = extract_events(raw)?;
    let midi = events_to_midi(&extracted.events, settings)?;

    log::info!(
        "Composition ready: {} events, {} skipped, {} bytes",
        extracted.events.len(),
        extracted.skipped,
        midi.len()
    );

    Ok(Composition {
        description: description.unwrap_or_default().to_string(),
        events: extracted.events,
        skipped: extracted.skipped,
        midi,
    })
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
