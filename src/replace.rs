//! Replace: one-shot and global substitution over a text snapshot.

use crate::utils::{byte_to_char_index, char_to_byte_index, fold_str};
use regex::Regex;
use thiserror::Error;

/// An invalid regex pattern, carrying the engine's diagnostic.
///
/// This is the only error replace can produce. It must reach the user's dialog, so it is a
/// typed error rather than a swallowed condition; "no match" is an ordinary result.
#[derive(Debug, Error)]
#[error("invalid pattern: {0}")]
pub struct PatternError(pub String);

/// Everything one replace invocation needs. A pure value; nothing outlives the call.
#[derive(Debug, Clone)]
pub struct ReplaceSpec {
    pub find: String,
    pub replace: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
}

/// Replace the leftmost occurrence of the pattern.
///
/// Returns the new text and whether anything was replaced. No match is not an error: the
/// input comes back unchanged with `false`. On a `PatternError` the input is untouched.
pub fn replace_one(text: &str, spec: &ReplaceSpec) -> Result<(String, bool), PatternError> {
    if spec.find.is_empty() {
        return Ok((text.to_string(), false));
    }

    if spec.use_regex {
        let re = compile(spec)?;
        if re.is_match(text) {
            return Ok((re.replace(text, spec.replace.as_str()).into_owned(), true));
        }
        return Ok((text.to_string(), false));
    }

    let ranges = literal_matches(text, spec);
    match ranges.first() {
        Some(&range) => Ok((splice(text, &[range], &spec.replace), true)),
        None => Ok((text.to_string(), false)),
    }
}

/// Replace every non-overlapping occurrence, left to right, in a single pass.
///
/// Returns the new text and the number of substitutions; a count of 0 means the result is
/// textually identical to the input. Regex mode uses the engine's global-substitution
/// semantics, so `$n` group references in the replacement work as usual.
pub fn replace_all(text: &str, spec: &ReplaceSpec) -> Result<(String, usize), PatternError> {
    if spec.find.is_empty() {
        return Ok((text.to_string(), 0));
    }

    if spec.use_regex {
        let re = compile(spec)?;
        let count = re.find_iter(text).count();
        return Ok((re.replace_all(text, spec.replace.as_str()).into_owned(), count));
    }

    let ranges = literal_matches(text, spec);
    let count = ranges.len();
    Ok((splice(text, &ranges, &spec.replace), count))
}

fn compile(spec: &ReplaceSpec) -> Result<Regex, PatternError> {
    let pattern = if spec.case_sensitive {
        spec.find.clone()
    } else {
        format!("(?i){}", spec.find)
    };
    Regex::new(&pattern).map_err(|e| PatternError(e.to_string()))
}

/// Non-overlapping literal matches, left to right, as half-open char ranges.
///
/// Case-insensitive mode locates matches in the folded text; the one-to-one fold keeps
/// those char offsets valid in the original, so the splice cuts at the original-case
/// boundaries and inserts the replacement verbatim.
fn literal_matches(text: &str, spec: &ReplaceSpec) -> Vec<(usize, usize)> {
    let (hay, needle) = if spec.case_sensitive {
        (text.to_string(), spec.find.clone())
    } else {
        (fold_str(text), fold_str(&spec.find))
    };
    let needle_chars = needle.chars().count();
    hay.match_indices(&needle)
        .map(|(bi, _)| {
            let start = byte_to_char_index(&hay, bi);
            (start, start + needle_chars)
        })
        .collect()
}

/// Rebuild `text` with `replacement` substituted over each char range.
fn splice(text: &str, ranges: &[(usize, usize)], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0usize;
    for &(start, end) in ranges {
        out.push_str(&text[char_to_byte_index(text, last)..char_to_byte_index(text, start)]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[char_to_byte_index(text, last)..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(find: &str, replace: &str, case_sensitive: bool, use_regex: bool) -> ReplaceSpec {
        ReplaceSpec {
            find: find.into(),
            replace: replace.into(),
            case_sensitive,
            use_regex,
        }
    }

    #[test]
    fn replace_one_takes_leftmost() {
        let (out, replaced) = replace_one("foo bar foo", &spec("foo", "X", true, false)).unwrap();
        assert!(replaced);
        assert_eq!(out, "X bar foo");
    }

    #[test]
    fn replace_one_no_match_is_not_an_error() {
        let (out, replaced) = replace_one("foo", &spec("baz", "X", true, false)).unwrap();
        assert!(!replaced);
        assert_eq!(out, "foo");
    }

    #[test]
    fn replace_one_removes_at_most_one_occurrence_per_call() {
        let sp = spec("a+", "_", true, true);
        let mut text = "aa b aa b aa".to_string();
        let mut remaining = 3usize;
        loop {
            let (out, replaced) = replace_one(&text, &sp).unwrap();
            if !replaced {
                break;
            }
            text = out;
            remaining -= 1;
            let re = Regex::new("a+").unwrap();
            assert_eq!(re.find_iter(&text).count(), remaining);
        }
        assert_eq!(remaining, 0);
    }

    #[test]
    fn replace_all_case_insensitive_fold() {
        let (out, count) = replace_all("aAbAa", &spec("a", "X", false, false)).unwrap();
        assert_eq!(out, "XXbXX");
        assert_eq!(count, 4);
    }

    #[test]
    fn replace_all_no_match_returns_identical_text() {
        let (out, count) = replace_all("foo bar", &spec("zzz", "X", true, false)).unwrap();
        assert_eq!(count, 0);
        assert_eq!(out, "foo bar");
    }

    #[test]
    fn replace_all_counts_regex_matches() {
        let (out, count) = replace_all("a1 b22 c333", &spec(r"\d+", "#", true, true)).unwrap();
        assert_eq!(out, "a# b# c#");
        assert_eq!(count, 3);
    }

    #[test]
    fn regex_group_references_substitute() {
        let (out, count) =
            replace_all("john smith", &spec(r"(\w+) (\w+)", "$2 $1", true, true)).unwrap();
        assert_eq!(out, "smith john");
        assert_eq!(count, 1);
    }

    #[test]
    fn invalid_regex_is_a_pattern_error() {
        let err = replace_all("unchanged", &spec("[abc", "X", true, true)).unwrap_err();
        assert!(!err.0.is_empty());
        // replace_one goes through the same compile path.
        assert!(replace_one("unchanged", &spec("[abc", "X", true, true)).is_err());
    }

    #[test]
    fn regex_mode_honors_case_insensitivity() {
        let (out, count) = replace_all("Foo foo FOO", &spec("foo", "x", false, true)).unwrap();
        assert_eq!(out, "x x x");
        assert_eq!(count, 3);
    }

    #[test]
    fn empty_find_pattern_is_a_no_op() {
        let (out, count) = replace_all("abc", &spec("", "X", true, true)).unwrap();
        assert_eq!(out, "abc");
        assert_eq!(count, 0);
    }

    #[test]
    fn literal_insensitive_replacement_is_verbatim() {
        // The replacement is inserted as given, not re-cased to the original.
        let (out, count) = replace_all("HELLO hello", &spec("hello", "bye", false, false)).unwrap();
        assert_eq!(out, "bye bye");
        assert_eq!(count, 2);
    }

    #[test]
    fn literal_replace_handles_multibyte_boundaries() {
        let (out, count) = replace_all("héllo héllo", &spec("HÉLLO", "x", false, false)).unwrap();
        assert_eq!(out, "x x");
        assert_eq!(count, 2);
    }
}
