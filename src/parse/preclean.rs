//! Response pre-clean
//!
//! The model sometimes wraps its answer in a markdown code fence
//! (```` ```javascript ... ``` ````). Fence markers are removed before the
//! extractor runs; nothing else about the text changes.

use once_cell::sync::Lazy;
use regex::Regex;

/// A fence marker, plus its language tag when the tag runs to end of line
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:[A-Za-z][\w+-]*[ \t]*(?:\r?\n|$))?").expect("fence pattern is valid")
});

/// Strip code-fence markers and surrounding whitespace
pub fn strip_code_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}
