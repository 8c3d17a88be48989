//! Utility functions: UTF-8 index conversion and case folding.

use std::cmp::min; // comparison helpers

/// Convert a "character index" to a "byte index" in a UTF‑8 string.
///
/// Why this exists: Rust strings are UTF‑8, so you cannot safely slice with `s[a..b]` unless
/// `a` and `b` are **byte offsets** that lie on UTF‑8 character boundaries. Everything public
/// in this crate (match ranges, highlight spans) speaks char offsets, so slicing always goes
/// through here.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    let mut ci = 0usize;
    for (bi, _) in s.char_indices() {
        if ci == char_idx {
            return bi;
        }
        ci += 1;
    }
    s.len()
}

/// Convert a byte offset back into a character index.
pub fn byte_to_char_index(s: &str, byte_idx: usize) -> usize {
    s[..min(byte_idx, s.len())].chars().count()
}

/// Lowercase a single character with a *simple* fold: the first character of the Unicode
/// lowercase mapping, or the character itself.
///
/// The mapping is one-to-one by construction, which keeps char offsets aligned between a
/// folded string and its original — case-insensitive search and replace rely on that to
/// slice the original text at match boundaries found in the folded text. The trade-off:
/// multi-char case expansions (e.g. ß → "ss") do not match their expanded form.
pub fn simple_fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold a whole string with [`simple_fold`]. Output has the same char count as the input.
pub fn fold_str(s: &str) -> String {
    s.chars().map(simple_fold).collect()
}
