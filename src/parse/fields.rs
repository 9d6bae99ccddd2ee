//! Field validator for event call arguments
//!
//! Pulls the `pitch` and `duration` fields out of one call's argument text by
//! independent pattern searches, so field order and surrounding noise do not
//! matter. Anything that cannot be matched structurally is a skip, never an
//! attempt to interpret the text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{DurationCode, PitchSet, ValidatedEvent};
use crate::parse::errors::SkipReason;

/// `pitch: [` (key may be quoted); the list body is read by `scan_pitch_list`
static PITCH_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bpitch\b["']?\s*:\s*\["#).expect("pitch list pattern is valid")
});

/// `pitch: 'C4'` single-token form
static PITCH_SINGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bpitch\b["']?\s*:\s*(?:'([^'\n]*)'|"([^"\n]*)")"#)
        .expect("pitch token pattern is valid")
});

/// `duration: '4'` or `duration: "4"`
static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bduration\b["']?\s*:\s*(?:'([^'\n]*)'|"([^"\n]*)")"#)
        .expect("duration pattern is valid")
});

/// Validate one call's argument text into an event
pub fn build_event(args: &str) -> Result<ValidatedEvent, SkipReason> {
    let pitches = extract_pitches(args)?;
    let duration = extract_duration(args).ok_or(SkipReason::MissingDuration)?;
    Ok(ValidatedEvent::new(pitches, duration))
}

fn extract_pitches(args: &str) -> Result<PitchSet, SkipReason> {
    if let Some(open) = PITCH_LIST.find(args) {
        let tokens = scan_pitch_list(&args[open.end()..]).ok_or(SkipReason::EmptyPitchList)?;
        return PitchSet::new(tokens).ok_or(SkipReason::EmptyPitchList);
    }

    if let Some(token) = PITCH_SINGLE.captures(args).and_then(|c| quoted_capture(&c)) {
        return PitchSet::new([token]).ok_or(SkipReason::EmptyPitchList);
    }

    Err(SkipReason::MissingPitch)
}

fn extract_duration(args: &str) -> Option<DurationCode> {
    DURATION
        .captures(args)
        .and_then(|c| quoted_capture(&c))
        .and_then(DurationCode::new)
}

/// Read a pitch list body that starts just after its `[`
///
/// Entries must be quoted tokens or bare MIDI numbers. Brackets and commas
/// inside quotes or comments belong to the entry they sit in. Returns `None`
/// for an unterminated list or an entry that is anything else (a variable,
/// an index expression, a template string).
fn scan_pitch_list(rest: &str) -> Option<Vec<String>> {
    let bytes = rest.as_bytes();
    let mut tokens = Vec::new();
    let mut quoted: Option<&str> = None;
    let mut bare = String::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b',' | b']' => {
                tokens.extend(list_entry(quoted.take(), &bare)?);
                bare.clear();
                if bytes[i] == b']' {
                    return Some(tokens);
                }
                i += 1;
            }
            q @ (b'\'' | b'"') => {
                // A second quoted string in one entry is not a literal token
                if quoted.is_some() {
                    return None;
                }
                let start = i + 1;
                let end = start + rest[start..].find([q as char, '\n'])?;
                if bytes[end] != q {
                    return None;
                }
                quoted = Some(&rest[start..end]);
                i = end + 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2 + rest[i + 2..].find("*/")? + 2;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i += rest[i..].find('\n')?;
            }
            _ => {
                let c = rest[i..].chars().next()?;
                if !c.is_whitespace() {
                    bare.push(c);
                }
                i += c.len_utf8();
            }
        }
    }

    None
}

/// One list entry: `Some(None)` for an empty slot (`[, 'C4',]`)
fn list_entry(quoted: Option<&str>, bare: &str) -> Option<Option<String>> {
    match (quoted, bare) {
        (Some(token), "") => Some(Some(token.to_string())),
        (None, "") => Some(None),
        (None, number) if number.bytes().all(|b| b.is_ascii_digit()) => Some(Some(number.to_string())),
        _ => None,
    }
}

fn quoted_capture<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}
