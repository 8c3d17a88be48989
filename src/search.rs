//! Incremental find: scan a text snapshot for the next/previous occurrence of a pattern.

use crate::utils::{byte_to_char_index, char_to_byte_index, fold_str};

/// A match in the document: half-open char offsets into the snapshot.
///
/// Never stored across edits; the caller re-runs the search against the new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

/// The state a find dialog keeps alive across repeated next/previous presses.
///
/// `last_match_end` is the scan cursor: the char offset just past the previous hit.
/// Forward search resumes there, backward search starts one char before it, and a miss
/// resets it to the top of the document.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub pattern: String,
    pub case_sensitive: bool,
    last_match_end: usize,
}

impl SearchState {
    pub fn new(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            pattern: pattern.into(),
            case_sensitive,
            last_match_end: 0,
        }
    }

    /// Current scan cursor (char offset). Mostly useful for the host's status display.
    pub fn cursor(&self) -> usize {
        self.last_match_end
    }
}

/// Find the next (or previous) occurrence of `state.pattern` in `text`.
///
/// Forward search wraps: if the tail past the cursor has no hit, the scan restarts at the
/// top within the same call, so a pattern that occurs anywhere is always found. Backward
/// search does not wrap; it takes the nearest occurrence starting at or before the cursor.
/// `None` means the pattern occurs nowhere (or is empty), and leaves the cursor at the top.
///
/// The engine never mutates the document. The caller applies the selection/highlight over
/// exactly the returned range, clearing any previous one first.
pub fn find_next(text: &str, state: &mut SearchState, backwards: bool) -> Option<MatchRange> {
    if state.pattern.is_empty() {
        return None;
    }

    let (hay, needle) = if state.case_sensitive {
        (text.to_string(), state.pattern.clone())
    } else {
        (fold_str(text), fold_str(&state.pattern))
    };
    let needle_chars = needle.chars().count();
    // The cursor survives edits; clamp it so a shrunken document can't strand it.
    let cursor = state.last_match_end.min(hay.chars().count());

    let found = if backwards {
        find_backward(&hay, &needle, cursor.saturating_sub(1))
    } else {
        scan_from(&hay, &needle, cursor).or_else(|| scan_from(&hay, &needle, 0))
    };

    match found {
        Some(start) => {
            let range = MatchRange {
                start,
                end: start + needle_chars,
            };
            state.last_match_end = range.end;
            Some(range)
        }
        None => {
            state.last_match_end = 0;
            None
        }
    }
}

/// First occurrence of `needle` at or after char offset `from`, as a char offset.
fn scan_from(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let b0 = char_to_byte_index(hay, from);
    let tail = &hay[b0..];
    let idx = tail.find(needle)?;
    Some(from + byte_to_char_index(tail, idx))
}

/// Last occurrence of `needle` starting at or before char offset `upto`.
fn find_backward(hay: &str, needle: &str, upto: usize) -> Option<usize> {
    let mut best = None;
    for (bi, _) in hay.match_indices(needle) {
        let ci = byte_to_char_index(hay, bi);
        if ci > upto {
            break;
        }
        best = Some(ci);
    }
    best
}
