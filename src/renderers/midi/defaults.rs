//! Default values for MIDI export
//!
//! Provides sensible defaults for tempo, velocity, channel assignment, etc.

/// Default tempo in beats per minute
pub const DEFAULT_TEMPO_BPM: f64 = 120.0;

/// Default MIDI velocity (1-127, where 64 is "normal")
pub const DEFAULT_VELOCITY: u8 = 64;

/// Default MIDI program (0 = Acoustic Grand Piano in General MIDI)
pub const DEFAULT_PROGRAM: u8 = 0;

/// Default MIDI channel for the generated track
pub const DEFAULT_CHANNEL: u8 = 0;

/// Default ticks per quarter note (MIDI resolution)
/// 480 is standard and provides good resolution
pub const DEFAULT_TPQ: u16 = 480;

/// Track name written into the note track
pub const DEFAULT_TRACK_NAME: &str = "MidiGenius";

/// File name offered for download
pub const MIDI_FILE_NAME: &str = "MidiGenius_output.mid";

/// Slowest tempo whose microseconds-per-quarter still fits the 24-bit tempo field
pub const MIN_TEMPO_BPM: f64 = 60_000_000.0 / 0x00FF_FFFF as f64;

/// Largest ticks-per-quarter value the 15-bit metrical timing field can hold
pub const MAX_TPQ: u16 = 0x7FFF;
