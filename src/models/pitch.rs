//! Pitch token to MIDI note number conversion
//!
//! Accepts the spellings the encoder notation allows: a note letter with
//! optional accidentals and an octave (`C4`, `F#3`, `Bb2`, `cbb-1`), or a bare
//! MIDI note number (`60`). Middle C is `C4` = 60.

/// Semitone offset of a note letter from C
fn step_semitone(step: char) -> Option<i16> {
    match step.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Split a pitch name into (step, alteration, octave)
///
/// # Examples
/// - `"C4"` → `('C', 0, 4)`
/// - `"Eb3"` → `('E', -1, 3)`
/// - `"F##5"` → `('F', 2, 5)`
fn parse_pitch_name(token: &str) -> Option<(char, i8, i8)> {
    let mut chars = token.chars();
    let step = chars.next()?;
    step_semitone(step)?;

    let rest = chars.as_str();
    let octave_start = rest
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .unwrap_or(rest.len());
    let (accidentals, octave) = rest.split_at(octave_start);

    let mut alter: i8 = 0;
    for c in accidentals.chars() {
        match c {
            '#' | '♯' => alter += 1,
            'b' | '♭' => alter -= 1,
            _ => return None,
        }
    }
    if !(-2..=2).contains(&alter) {
        return None;
    }

    let octave: i8 = octave.parse().ok()?;
    if !(-1..=9).contains(&octave) {
        return None;
    }

    Some((step.to_ascii_uppercase(), alter, octave))
}

/// Convert a pitch token to a MIDI note number (0-127)
///
/// Returns `None` for unrecognized spellings and for pitches that fall
/// outside the MIDI range (e.g. `G#9`).
pub fn pitch_token_to_midi(token: &str) -> Option<u8> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse::<u8>().ok().filter(|n| *n <= 127);
    }

    let (step, alter, octave) = parse_pitch_name(token)?;
    // MIDI note 0 = C-1, so C4 (middle C) = 60
    let semi = step_semitone(step)? + alter as i16 + (octave as i16 + 1) * 12;
    u8::try_from(semi).ok().filter(|n| *n <= 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_token_to_midi_c_major_scale() {
        assert_eq!(pitch_token_to_midi("C4"), Some(60));
        assert_eq!(pitch_token_to_midi("D4"), Some(62));
        assert_eq!(pitch_token_to_midi("E4"), Some(64));
        assert_eq!(pitch_token_to_midi("F4"), Some(65));
        assert_eq!(pitch_token_to_midi("G4"), Some(67));
        assert_eq!(pitch_token_to_midi("A4"), Some(69));
        assert_eq!(pitch_token_to_midi("B4"), Some(71));
    }

    #[test]
    fn test_pitch_token_to_midi_accidentals() {
        assert_eq!(pitch_token_to_midi("C#4"), Some(61));
        assert_eq!(pitch_token_to_midi("Db4"), Some(61));
        assert_eq!(pitch_token_to_midi("C##4"), Some(62));
        assert_eq!(pitch_token_to_midi("Cb4"), Some(59));
        assert_eq!(pitch_token_to_midi("Bb3"), Some(58));
        assert_eq!(pitch_token_to_midi("bb3"), Some(58));
    }

    #[test]
    fn test_pitch_token_to_midi_octaves() {
        assert_eq!(pitch_token_to_midi("B3"), Some(59));
        assert_eq!(pitch_token_to_midi("C5"), Some(72));
        assert_eq!(pitch_token_to_midi("C-1"), Some(0));
        assert_eq!(pitch_token_to_midi("G9"), Some(127));
    }

    #[test]
    fn test_pitch_token_to_midi_numbers() {
        assert_eq!(pitch_token_to_midi("60"), Some(60));
        assert_eq!(pitch_token_to_midi("127"), Some(127));
        assert_eq!(pitch_token_to_midi("128"), None);
    }

    #[test]
    fn test_pitch_token_to_midi_rejects_garbage() {
        assert_eq!(pitch_token_to_midi("H4"), None);
        assert_eq!(pitch_token_to_midi("C"), None);
        assert_eq!(pitch_token_to_midi("Cx4"), None);
        assert_eq!(pitch_token_to_midi("C###4"), None);
        assert_eq!(pitch_token_to_midi("G#9"), None);
        assert_eq!(pitch_token_to_midi("Cb-1"), None);
        assert_eq!(pitch_token_to_midi(""), None);
    }

    #[test]
    fn test_parse_pitch_name_parts() {
        assert_eq!(parse_pitch_name("Eb3"), Some(('E', -1, 3)));
        assert_eq!(parse_pitch_name("f##5"), Some(('F', 2, 5)));
        assert_eq!(parse_pitch_name("C-1"), Some(('C', 0, -1)));
        assert_eq!(parse_pitch_name("C10"), None);
    }
}
