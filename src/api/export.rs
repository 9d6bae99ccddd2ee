//! Export operations for the WASM API
//!
//! - Note event extraction: validated events + skip report as a JS object
//! - MIDI: Standard MIDI File Format 1 as `Uint8Array`
//! - Generation response: description + MIDI bundle for the download button

use wasm_bindgen::prelude::*;

use crate::api::helpers::{serialize, settings_from_js, to_js_error, to_uint8_array};
use crate::generate::{compose, compose_from_text, Composition, GenerationResponse};
use crate::parse::extract_events;

// ============================================================================
// Event Extraction
// ============================================================================

/// Extract validated note events from a model response
///
/// # Returns
/// `{ events: [{ pitches, duration }], skipped, skippedCalls }`
///
/// Throws when no usable event is found.
#[wasm_bindgen(js_name = extractNoteEvents)]
pub fn extract_note_events(text: &str) -> Result<JsValue, JsValue> {
    log::info!("extractNoteEvents called ({} bytes)", text.len());

    let result = extract_events(text).map_err(to_js_error)?;
    serialize(&result, "Failed to serialize extraction result")
}

// ============================================================================
// MIDI Export
// ============================================================================

/// Convert a model response straight to MIDI bytes
///
/// # Arguments
/// * `text` - Raw `midiData` text from the model
/// * `settings` - Optional `{ tpq, tempoBpm, velocity, channel, program, trackName }`
///
/// # Returns
/// MIDI file as Uint8Array (Standard MIDI File Format 1)
#[wasm_bindgen(js_name = generateMidiFromResponse)]
pub fn generate_midi_from_response(
    text: &str,
    settings: JsValue,
) -> Result<js_sys::Uint8Array, JsValue> {
    log::info!("generateMidiFromResponse called ({} bytes)", text.len());

    let settings = settings_from_js(settings)?;
    let composition = compose_from_text(text, None, &settings).map_err(to_js_error)?;

    log::info!("  MIDI generated: {} bytes", composition.midi.len());
    Ok(to_uint8_array(&composition.midi))
}

// ============================================================================
// Generation Response
// ============================================================================

/// MIDI file plus the metadata the download view shows
#[wasm_bindgen]
pub struct GeneratedMidi {
    inner: Composition,
}

#[wasm_bindgen]
impl GeneratedMidi {
    #[wasm_bindgen(getter)]
    pub fn description(&self) -> String {
        self.inner.description.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn midi(&self) -> js_sys::Uint8Array {
        to_uint8_array(&self.inner.midi)
    }

    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.inner.file_name().to_string()
    }

    #[wasm_bindgen(getter, js_name = eventCount)]
    pub fn event_count(&self) -> usize {
        self.inner.events.len()
    }

    #[wasm_bindgen(getter)]
    pub fn skipped(&self) -> usize {
        self.inner.skipped
    }
}

/// Process the model's structured JSON output (`{ description, midiData }`)
///
/// Throws "try a different prompt" when the response is incomplete or holds
/// no usable note events.
#[wasm_bindgen(js_name = processGenerationResponse)]
pub fn process_generation_response(
    json: &str,
    settings: JsValue,
) -> Result<GeneratedMidi, JsValue> {
    log::info!("processGenerationResponse called ({} bytes)", json.len());

    let settings = settings_from_js(settings)?;
    let response = GenerationResponse::from_json(json).map_err(to_js_error)?;
    let composition = compose(&response, &settings).map_err(to_js_error)?;

    if composition.skipped > 0 {
        log::warn!("  {} malformed note events were dropped", composition.skipped);
    }

    Ok(GeneratedMidi { inner: composition })
}
