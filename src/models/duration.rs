//! Duration code to tick conversion
//!
//! Duration codes use the notation of the MIDI writer library the upstream
//! model is prompted with:
//!
//! | Code         | Meaning                              |
//! |--------------|--------------------------------------|
//! | `1`          | whole note                           |
//! | `2`, `4`     | half, quarter                        |
//! | `8` … `64`   | eighth through sixty-fourth          |
//! | `d4`, `4d`   | dotted quarter                       |
//! | `dd4`        | double-dotted quarter                |
//! | `8t`         | eighth-note triplet                  |
//! | `T96`        | explicit tick count (up to `u32::MAX`) |

/// Note values (denominators of a whole note) the notation supports
const NOTE_VALUES: [u64; 7] = [1, 2, 4, 8, 16, 32, 64];

/// Convert a duration code to ticks at the given resolution
///
/// Returns `None` for codes outside the notation or durations that round
/// down to zero ticks.
pub fn duration_code_to_ticks(code: &str, tpq: u16) -> Option<u64> {
    let code = code.trim();

    if let Some(ticks) = code.strip_prefix('T') {
        return ticks.parse::<u32>().ok().filter(|t| *t > 0).map(u64::from);
    }

    let prefix_dots = code.len() - code.trim_start_matches('d').len();
    let rest = &code[prefix_dots..];

    let (rest, triplet) = match rest.strip_suffix('t') {
        Some(r) => (r, true),
        None => (rest, false),
    };

    let suffix_dots = rest.len() - rest.trim_end_matches('d').len();
    let value = &rest[..rest.len() - suffix_dots];

    let dots = prefix_dots + suffix_dots;
    if dots > 2 || (prefix_dots > 0 && suffix_dots > 0) {
        return None;
    }

    let denominator: u64 = value.parse().ok()?;
    if !NOTE_VALUES.contains(&denominator) {
        return None;
    }

    let whole = tpq as u64 * 4;
    let base = whole / denominator;

    let mut ticks = base;
    let mut extension = base;
    for _ in 0..dots {
        extension /= 2;
        ticks += extension;
    }

    if triplet {
        ticks = ticks * 2 / 3;
    }

    Some(ticks).filter(|t| *t > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_note_values() {
        assert_eq!(duration_code_to_ticks("1", 480), Some(1920));
        assert_eq!(duration_code_to_ticks("2", 480), Some(960));
        assert_eq!(duration_code_to_ticks("4", 480), Some(480));
        assert_eq!(duration_code_to_ticks("8", 480), Some(240));
        assert_eq!(duration_code_to_ticks("16", 480), Some(120));
        assert_eq!(duration_code_to_ticks("64", 480), Some(30));
    }

    #[test]
    fn test_dotted_values() {
        assert_eq!(duration_code_to_ticks("d4", 480), Some(720));
        assert_eq!(duration_code_to_ticks("4d", 480), Some(720));
        assert_eq!(duration_code_to_ticks("8d", 480), Some(360));
        assert_eq!(duration_code_to_ticks("dd4", 480), Some(840));
        assert_eq!(duration_code_to_ticks("ddd4", 480), None);
        assert_eq!(duration_code_to_ticks("d4d", 480), None);
    }

    #[test]
    fn test_triplets() {
        assert_eq!(duration_code_to_ticks("4t", 480), Some(320));
        assert_eq!(duration_code_to_ticks("8t", 480), Some(160));
    }

    #[test]
    fn test_explicit_ticks() {
        assert_eq!(duration_code_to_ticks("T96", 480), Some(96));
        assert_eq!(duration_code_to_ticks("T0", 480), None);
        assert_eq!(duration_code_to_ticks("Tabc", 480), None);
        assert_eq!(duration_code_to_ticks("T4294967295", 480), Some(u32::MAX as u64));
        assert_eq!(duration_code_to_ticks("T4294967296", 480), None);
        assert_eq!(duration_code_to_ticks("T18446744073709551615", 480), None);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(duration_code_to_ticks("3", 480), None);
        assert_eq!(duration_code_to_ticks("quarter", 480), None);
        assert_eq!(duration_code_to_ticks("", 480), None);
        assert_eq!(duration_code_to_ticks("d", 480), None);
    }

    #[test]
    fn test_low_resolution_rounds_to_zero() {
        // 64th note at 8 ticks per quarter is half a tick
        assert_eq!(duration_code_to_ticks("64", 8), None);
        assert_eq!(duration_code_to_ticks("4", 8), Some(8));
    }
}
