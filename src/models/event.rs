//! Validated note event records
//!
//! These are the only values that leave the extraction pipeline. Every
//! constructor enforces the trimming and non-empty rules, so a `PitchSet` or
//! `DurationCode` in hand is always usable by the MIDI encoder.

use serde::Serialize;

/// Characters stripped from both ends of a token before it is accepted
const QUOTE_CHARS: [char; 3] = ['\'', '"', '`'];

/// Trim whitespace and quote characters until neither remains at the ends
fn clean_token(raw: &str) -> &str {
    let mut token = raw;
    loop {
        let trimmed = token.trim().trim_matches(&QUOTE_CHARS[..]);
        if trimmed.len() == token.len() {
            return trimmed;
        }
        token = trimmed;
    }
}

/// Ordered, non-empty list of simultaneous pitch tokens (e.g. `["C4", "E4"]`)
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PitchSet(Vec<String>);

impl PitchSet {
    /// Build a pitch set from raw tokens.
    ///
    /// Tokens are trimmed of whitespace and quotes; tokens that end up empty
    /// are dropped. Returns `None` when nothing is left.
    pub fn new<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pitches: Vec<String> = tokens
            .into_iter()
            .map(|t| clean_token(t.as_ref()).to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if pitches.is_empty() {
            None
        } else {
            Some(Self(pitches))
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Note length in the encoder's duration notation (`"4"`, `"d2"`, `"8t"`, `"T96"`)
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DurationCode(String);

impl DurationCode {
    /// Returns `None` if the code is empty after trimming whitespace and quotes
    pub fn new(raw: &str) -> Option<Self> {
        let code = clean_token(raw);
        if code.is_empty() {
            None
        } else {
            Some(Self(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DurationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One note event that passed field validation
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidatedEvent {
    pitches: PitchSet,
    duration: DurationCode,
}

impl ValidatedEvent {
    /// Only the field builder in `parse::fields` creates events
    pub(crate) fn new(pitches: PitchSet, duration: DurationCode) -> Self {
        Self { pitches, duration }
    }

    pub fn pitches(&self) -> &PitchSet {
        &self.pitches
    }

    pub fn duration(&self) -> &DurationCode {
        &self.duration
    }
}
