//! Event call extractor
//!
//! Scans untrusted text for `MidiWriter.NoteEvent( ... )` calls and yields
//! the raw argument text of each one, left to right. The text is never
//! evaluated: the scanner only counts parentheses.
//!
//! The argument body can contain its own parentheses (inside array or object
//! literals, stray comments, odd tokens), so the end of a call is the first
//! `)` that brings the nesting depth back to zero, not the first `)` seen.
//! Parentheses inside quoted strings are ignored.

/// Fully-qualified constructor name that marks an event call
pub const EVENT_CALL_PREFIX: &str = "MidiWriter.NoteEvent";

/// One located event call, before any field validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCallOccurrence<'a> {
    /// Byte offset of the call prefix in the scanned text
    pub offset: usize,
    /// Text between the opening parenthesis and its matching close
    pub args: &'a str,
}

/// Lazy iterator over the event calls in a text
///
/// Cloning the iterator (or calling [`event_calls`] again) restarts the scan;
/// the scan itself holds nothing but a cursor into the borrowed text.
#[derive(Debug, Clone)]
pub struct EventCalls<'a> {
    text: &'a str,
    cursor: usize,
}

/// Start scanning `text` for event calls
pub fn event_calls(text: &str) -> EventCalls<'_> {
    EventCalls { text, cursor: 0 }
}

impl<'a> Iterator for EventCalls<'a> {
    type Item = EventCallOccurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.text.len() {
            let found = self.text[self.cursor..].find(EVENT_CALL_PREFIX)?;
            let offset = self.cursor + found;
            let after_prefix = offset + EVENT_CALL_PREFIX.len();

            // Resume after the prefix if this one turns out not to be a call
            self.cursor = after_prefix;

            let tail = &self.text[after_prefix..];
            let tail_trimmed = tail.trim_start();
            if !tail_trimmed.starts_with('(') {
                continue;
            }

            let body_start = after_prefix + (tail.len() - tail_trimmed.len()) + 1;
            if let Some(close) = matching_close(self.text, body_start) {
                self.cursor = close + 1;
                return Some(EventCallOccurrence {
                    offset,
                    args: &self.text[body_start..close],
                });
            }

            log::debug!("Unclosed event call at byte {}", offset);
        }

        self.cursor = self.text.len();
        None
    }
}

impl std::iter::FusedIterator for EventCalls<'_> {}

/// Find the `)` that closes a parenthesis opened just before `start`
///
/// Single and double quoted strings end at a newline even when the closing
/// quote is missing, so one stray apostrophe cannot swallow the rest of the
/// response. Backtick strings may span lines.
fn matching_close(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q || (b == b'\n' && q != b'`') {
                quote = None;
            }
            continue;
        }

        match b {
            b'\'' | b'"' | b'`' => quote = Some(b),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
