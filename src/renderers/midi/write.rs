//! Score IR to Standard MIDI File
//!
//! Every track is built the same way: events are collected with their
//! absolute tick parked in the delta field, stably sorted, then rewritten as
//! real deltas before the end-of-track marker.

use crate::renderers::midi::{model::*, MidiError, Result};
use midly::num::{u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

/// Last tick an event can sit at (delta times are 28-bit)
pub const MAX_TICK: u64 = 0x0FFF_FFFF;

/// Write Score IR to Standard MIDI File (SMF) Format 1
pub fn write_smf(score: &Score, out: &mut Vec<u8>) -> Result<()> {
    // Track 0: Tempo and time signature map, tracks 1+: one per part
    let mut tracks = vec![build_conductor_track(score)];
    for part in &score.parts {
        tracks.push(build_part_track(part)?);
    }

    let smf = Smf {
        header: Header {
            format: Format::Parallel,
            timing: Timing::Metrical(score.tpq.into()),
        },
        tracks,
    };

    smf.write(out)
        .map_err(|e| MidiError::Write(format!("Failed to write MIDI: {}", e)))?;

    Ok(())
}

fn build_conductor_track<'a>(score: &Score) -> Track<'a> {
    let tempos = score.tempos.iter().map(|tempo| {
        // Tempo is stored as microseconds per quarter note
        let usec_per_quarter = (60_000_000.0 / tempo.bpm) as u32;
        at_tick(tempo.tick as u32, TrackEventKind::Meta(MetaMessage::Tempo(usec_per_quarter.into())))
    });

    let timesigs = score.timesigs.iter().map(|ts| {
        // Denominator as a power of 2 (4 -> 2, 8 -> 3)
        let denominator_power = ts.den.max(1).trailing_zeros() as u8;
        at_tick(
            ts.tick as u32,
            TrackEventKind::Meta(MetaMessage::TimeSignature(
                ts.num,
                denominator_power,
                24, // MIDI clocks per metronome click
                8,  // 32nd notes per quarter note
            )),
        )
    });

    finish_track(tempos.chain(timesigs).collect())
}

fn build_part_track(part: &Part) -> Result<Track<'_>> {
    let channel = u4::from(part.channel);

    // Track name
    let mut events = vec![at_tick(0, TrackEventKind::Meta(MetaMessage::TrackName(part.name.as_bytes())))];

    // Program change (instrument)
    if let Some(program) = part.program {
        events.push(at_tick(
            0,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange { program: program.into() },
            },
        ));
    }

    for note in &part.notes {
        let (on_tick, off_tick) = note_ticks(note)?;
        let key = u7::from(note.pitch);

        events.push(at_tick(
            on_tick,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, vel: note.vel.into() },
            },
        ));
        events.push(at_tick(
            off_tick,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff { key, vel: 0.into() },
            },
        ));
    }

    Ok(finish_track(events))
}

/// Absolute on/off ticks of a note, or an error if it ends past `MAX_TICK`
fn note_ticks(note: &Note) -> Result<(u32, u32)> {
    let end_tick = note
        .start_tick
        .checked_add(note.dur_tick)
        .filter(|t| *t <= MAX_TICK)
        .ok_or_else(|| {
            MidiError::Write(format!(
                "Note starting at tick {} ends past the MIDI tick range",
                note.start_tick
            ))
        })?;

    // start <= end, so both fit
    Ok((note.start_tick as u32, end_tick as u32))
}

/// Event parked at an absolute tick until `finish_track` converts it
fn at_tick(tick: u32, kind: TrackEventKind<'_>) -> TrackEvent<'_> {
    TrackEvent { delta: tick.into(), kind }
}

fn finish_track(mut events: Vec<TrackEvent<'_>>) -> Track<'_> {
    // Stable sort keeps a note's off ahead of a later note's on at the same tick
    events.sort_by_key(|e| e.delta.as_int());
    convert_to_delta_times(&mut events);

    // End of track
    events.push(at_tick(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)));
    events
}

/// Convert absolute tick times to delta times (time since previous event)
fn convert_to_delta_times(events: &mut [TrackEvent]) {
    let mut prev_tick = 0u32;
    for event in events.iter_mut() {
        let current_tick = event.delta.as_int();
        event.delta = current_tick.saturating_sub(prev_tick).into();
        prev_tick = current_tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piano(notes: Vec<Note>) -> Part {
        Part {
            name: "Piano".to_string(),
            channel: 0,
            program: Some(0),
            notes,
        }
    }

    fn single_part_score(notes: Vec<Note>) -> Score {
        Score {
            tpq: 480,
            tempos: vec![Tempo { tick: 0, bpm: 120.0 }],
            timesigs: vec![TimeSig { tick: 0, num: 4, den: 4 }],
            parts: vec![piano(notes)],
        }
    }

    #[test]
    fn test_write_minimal_smf() {
        let score = single_part_score(vec![Note { start_tick: 0, dur_tick: 480, pitch: 60, vel: 64 }]);

        let mut out = Vec::new();
        write_smf(&score, &mut out).expect("Failed to write SMF");

        assert_eq!(&out[0..4], b"MThd");
        // Format 1, two tracks (conductor + part)
        assert_eq!(&out[8..12], &[0x00, 0x01, 0x00, 0x02]);
        // 480 ticks per quarter
        assert_eq!(&out[12..14], &[0x01, 0xE0]);
    }

    #[test]
    fn test_delta_time_conversion() {
        let mut events = vec![
            TrackEvent {
                delta: 0.into(),
                kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Test")),
            },
            TrackEvent {
                delta: 100.into(),
                kind: TrackEventKind::Midi {
                    channel: 0.into(),
                    message: MidiMessage::NoteOn {
                        key: 60.into(),
                        vel: 64.into(),
                    },
                },
            },
            TrackEvent {
                delta: 200.into(),
                kind: TrackEventKind::Midi {
                    channel: 0.into(),
                    message: MidiMessage::NoteOff {
                        key: 60.into(),
                        vel: 0.into(),
                    },
                },
            },
        ];

        convert_to_delta_times(&mut events);

        assert_eq!(events[0].delta.as_int(), 0);
        assert_eq!(events[1].delta.as_int(), 100);
        assert_eq!(events[2].delta.as_int(), 100); // 200 - 100 = 100
    }

    #[test]
    fn test_repeated_pitch_releases_before_retrigger() {
        let part = piano(vec![
            Note { start_tick: 0, dur_tick: 480, pitch: 60, vel: 64 },
            Note { start_tick: 480, dur_tick: 480, pitch: 60, vel: 64 },
        ]);

        let track = build_part_track(&part).unwrap();
        let kinds: Vec<_> = track
            .iter()
            .filter_map(|e| match e.kind {
                TrackEventKind::Midi { message: MidiMessage::NoteOn { .. }, .. } => Some(("on", e.delta.as_int())),
                TrackEventKind::Midi { message: MidiMessage::NoteOff { .. }, .. } => Some(("off", e.delta.as_int())),
                _ => None,
            })
            .collect();

        assert_eq!(kinds, vec![("on", 0), ("off", 480), ("on", 0), ("off", 480)]);
    }

    #[test]
    fn test_write_with_chord() {
        // Chord: C, E, G played simultaneously
        let score = single_part_score(vec![
            Note { start_tick: 0, dur_tick: 480, pitch: 60, vel: 64 },
            Note { start_tick: 0, dur_tick: 480, pitch: 64, vel: 64 },
            Note { start_tick: 0, dur_tick: 480, pitch: 67, vel: 64 },
        ]);

        let mut out = Vec::new();
        write_smf(&score, &mut out).expect("Failed to write SMF with chord");

        let smf = Smf::parse(&out).expect("written SMF parses back");
        let note_ons = smf.tracks[1]
            .iter()
            .filter(|e| matches!(e.kind, TrackEventKind::Midi { message: MidiMessage::NoteOn { .. }, .. }))
            .count();
        assert_eq!(note_ons, 3);
    }

    #[test]
    fn test_conductor_track_tempo() {
        let score = single_part_score(vec![]);
        let track = build_conductor_track(&score);

        assert!(matches!(
            track[0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 500_000
        ));
        assert!(matches!(
            track[1].kind,
            TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8))
        ));
        assert!(matches!(track.last().unwrap().kind, TrackEventKind::Meta(MetaMessage::EndOfTrack)));
    }

    #[test]
    fn test_note_past_tick_range_is_error() {
        let score = single_part_score(vec![Note { start_tick: MAX_TICK - 10, dur_tick: 480, pitch: 60, vel: 64 }]);

        let mut out = Vec::new();
        assert!(matches!(write_smf(&score, &mut out), Err(MidiError::Write(_))));
    }

    #[test]
    fn test_note_duration_overflow_is_error() {
        let note = Note { start_tick: 960, dur_tick: u64::MAX, pitch: 60, vel: 64 };
        assert!(matches!(note_ticks(&note), Err(MidiError::Write(_))));

        let last = Note { start_tick: MAX_TICK - 480, dur_tick: 480, pitch: 60, vel: 64 };
        assert_eq!(note_ticks(&last).unwrap(), ((MAX_TICK - 480) as u32, MAX_TICK as u32));
    }
}
