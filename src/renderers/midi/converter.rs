//! Validated events to MIDI Score conversion
//!
//! Events play one after another on a single part: each event starts where
//! the previous one ended, and all pitches of an event sound together.

use crate::models::{duration_code_to_ticks, pitch_token_to_midi, ValidatedEvent};
use super::model::{Note, Part, Score, Tempo, TimeSig};
use super::settings::EncodeSettings;
use super::{MidiError, Result};

/// Convert validated events to a MIDI Score
///
/// # Arguments
/// * `events` - Validated events in playback order
/// * `settings` - Resolution, tempo and track options
///
/// # Returns
/// MIDI Score ready for SMF serialization
pub fn events_to_score(events: &[ValidatedEvent], settings: &EncodeSettings) -> Result<Score> {
    settings.validate()?;

    let mut part = Part {
        name: settings.track_name.clone(),
        channel: settings.channel,
        program: settings.program,
        notes: Vec::new(),
    };

    let mut current_tick = 0u64;

    for event in events {
        let duration = event.duration();
        let dur_ticks = duration_code_to_ticks(duration.as_str(), settings.tpq)
            .ok_or_else(|| MidiError::UnsupportedDuration(duration.to_string()))?;

        for token in event.pitches().iter() {
            let pitch = pitch_token_to_midi(token)
                .ok_or_else(|| MidiError::UnsupportedPitch(token.to_string()))?;

            part.notes.push(Note {
                start_tick: current_tick,
                dur_tick: dur_ticks,
                pitch,
                vel: settings.velocity,
            });
        }

        current_tick = current_tick.checked_add(dur_ticks).ok_or_else(|| {
            MidiError::Write(format!("Event ending at tick {}+{} overflows", current_tick, dur_ticks))
        })?;
    }

    Ok(Score {
        tpq: settings.tpq,
        tempos: vec![Tempo {
            tick: 0,
            bpm: settings.tempo_bpm,
        }],
        timesigs: vec![TimeSig { tick: 0, num: 4, den: 4 }],
        parts: vec![part],
    })
}
