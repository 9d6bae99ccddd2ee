//! Encoder settings
//!
//! Every field has a default, so a JavaScript caller can pass a partial object
//! (`{ tempoBpm: 90 }`) or nothing at all.

use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_CHANNEL, DEFAULT_PROGRAM, DEFAULT_TEMPO_BPM, DEFAULT_TPQ, DEFAULT_TRACK_NAME,
    DEFAULT_VELOCITY, MAX_TPQ, MIN_TEMPO_BPM,
};
use super::{MidiError, Result};

/// Configuration options for MIDI encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeSettings {
    /// Ticks per quarter note
    pub tpq: u16,

    /// Tempo written to the conductor track
    pub tempo_bpm: f64,

    /// Velocity for every note (1-127)
    pub velocity: u8,

    /// MIDI channel (0-15)
    pub channel: u8,

    /// Program change sent before the first note; `None` leaves the synth default
    pub program: Option<u8>,

    /// Name of the note track
    pub track_name: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            tpq: DEFAULT_TPQ,
            tempo_bpm: DEFAULT_TEMPO_BPM,
            velocity: DEFAULT_VELOCITY,
            channel: DEFAULT_CHANNEL,
            program: Some(DEFAULT_PROGRAM),
            track_name: DEFAULT_TRACK_NAME.to_string(),
        }
    }
}

impl EncodeSettings {
    /// Check that every value fits its MIDI field
    pub fn validate(&self) -> Result<()> {
        if self.tpq == 0 || self.tpq > MAX_TPQ {
            return Err(MidiError::InvalidSettings(format!(
                "tpq {} out of range (1-{})",
                self.tpq, MAX_TPQ
            )));
        }
        if !self.tempo_bpm.is_finite() || self.tempo_bpm < MIN_TEMPO_BPM {
            return Err(MidiError::InvalidSettings(format!(
                "tempo {} BPM out of range (minimum {:.2})",
                self.tempo_bpm, MIN_TEMPO_BPM
            )));
        }
        if self.velocity == 0 || self.velocity > 127 {
            return Err(MidiError::InvalidSettings(format!(
                "velocity {} out of range (1-127)",
                self.velocity
            )));
        }
        if self.channel > 15 {
            return Err(MidiError::InvalidSettings(format!(
                "channel {} out of range (0-15)",
                self.channel
            )));
        }
        if let Some(program) = self.program {
            if program > 127 {
                return Err(MidiError::InvalidSettings(format!(
                    "program {} out of range (0-127)",
                    program
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        assert!(EncodeSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EncodeSettings = serde_json::from_str(r#"{"tempoBpm": 90.0}"#).unwrap();
        assert_eq!(settings.tempo_bpm, 90.0);
        assert_eq!(settings.tpq, DEFAULT_TPQ);
        assert_eq!(settings.track_name, DEFAULT_TRACK_NAME);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let cases = [
            EncodeSettings { tpq: 0, ..Default::default() },
            EncodeSettings { tpq: 0x8000, ..Default::default() },
            EncodeSettings { tempo_bpm: 0.0, ..Default::default() },
            EncodeSettings { tempo_bpm: f64::NAN, ..Default::default() },
            EncodeSettings { velocity: 0, ..Default::default() },
            EncodeSettings { velocity: 200, ..Default::default() },
            EncodeSettings { channel: 16, ..Default::default() },
            EncodeSettings { program: Some(128), ..Default::default() },
        ];

        for settings in cases {
            assert!(
                matches!(settings.validate(), Err(MidiError::InvalidSettings(_))),
                "expected {:?} to be rejected",
                settings
            );
        }
    }
}
