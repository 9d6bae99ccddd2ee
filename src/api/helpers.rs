//! Shared helpers for WASM API operations
//!
//! Common patterns for serialization, deserialization and error handling
//! across the exported functions.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::renderers::midi::EncodeSettings;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Read optional encoder settings; `undefined` and `null` mean defaults
pub fn settings_from_js(value: JsValue) -> Result<EncodeSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(EncodeSettings::default())
    } else {
        deserialize(value, "Invalid encode settings")
    }
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert any displayable error to a JsValue, logging it on the way out
pub fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    let msg = err.to_string();
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Copy bytes into a fresh `Uint8Array`
pub fn to_uint8_array(bytes: &[u8]) -> js_sys::Uint8Array {
    let array = js_sys::Uint8Array::new_with_length(bytes.len() as u32);
    array.copy_from(bytes);
    array
}
