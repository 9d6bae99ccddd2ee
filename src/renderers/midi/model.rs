/// Lean score representation for SMF output
///
/// Just what the writer needs: absolute-tick notes grouped into parts, plus
/// the tempo and time signature map for the conductor track.

#[derive(Debug, Clone)]
pub struct Score {
    pub tpq: u16,                 // Ticks per quarter note
    pub tempos: Vec<Tempo>,       // (tick, bpm) sorted by tick
    pub timesigs: Vec<TimeSig>,   // (tick, num, den) sorted by tick
    pub parts: Vec<Part>,         // One SMF track each
}

#[derive(Debug, Clone)]
pub struct Tempo {
    pub tick: u64,
    pub bpm: f64,
}

#[derive(Debug, Clone)]
pub struct TimeSig {
    pub tick: u64,
    pub num: u8,   // Numerator (e.g., 3 in 3/4)
    pub den: u8,   // Denominator (e.g., 4 in 3/4)
}

#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub channel: u8,          // MIDI channel 0-15 (9 = drums)
    pub program: Option<u8>,  // MIDI program 0-127 (GM instrument)
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub start_tick: u64,
    pub dur_tick: u64,
    pub pitch: u8,      // MIDI note number 0-127
    pub vel: u8,        // Velocity 1-127
}

impl Score {
    /// Tick at which the last note of any part ends
    pub fn end_tick(&self) -> u64 {
        self.parts
            .iter()
            .flat_map(|p| p.notes.iter())
            .map(|n| n.start_tick + n.dur_tick)
            .max()
            .unwrap_or(0)
    }

    pub fn note_count(&self) -> usize {
        self.parts.iter().map(|p| p.notes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(start_tick: u64, dur_tick: u64, pitch: u8) -> Note {
        Note { start_tick, dur_tick, pitch, vel: 64 }
    }

    #[test]
    fn test_score_end_tick_and_count() {
        let score = Score {
            tpq: 480,
            tempos: vec![Tempo { tick: 0, bpm: 120.0 }],
            timesigs: vec![TimeSig { tick: 0, num: 4, den: 4 }],
            parts: vec![Part {
                name: "Piano".to_string(),
                channel: 0,
                program: Some(0),
                notes: vec![note(0, 480, 60), note(0, 960, 64), note(480, 240, 67)],
            }],
        };

        assert_eq!(score.end_tick(), 960);
        assert_eq!(score.note_count(), 3);
    }

    #[test]
    fn test_empty_score_end_tick() {
        let score = Score { tpq: 480, tempos: vec![], timesigs: vec![], parts: vec![] };
        assert_eq!(score.end_tick(), 0);
        assert_eq!(score.note_count(), 0);
    }
}
