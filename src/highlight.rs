//! Syntax highlighting: classify a snapshot into keyword/string/comment spans.

use crate::utils::byte_to_char_index;
use anyhow::{Context, Result};
use regex::Regex;

/// What a highlighted span is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Keyword,
    StringLit,
    Comment,
}

/// A tagged span within the snapshot: half-open char offsets plus its classification.
///
/// The highlighter emits spans that are disjoint and ordered by start; the host maps each
/// kind to a visual tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: TagKind,
}

/// Languages this crate ships profiles for. The hint is derived externally (typically from
/// the file extension); the highlighter never sniffs content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Rust,
    JavaScript,
}

impl Language {
    /// Map a file extension (without the dot) to a language hint.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Python => &[
                "False", "None", "True", "and", "as", "assert", "async", "await", "break",
                "class", "continue", "def", "del", "elif", "else", "except", "finally", "for",
                "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or",
                "pass", "raise", "return", "try", "while", "with", "yield",
            ],
            Self::Rust => &[
                "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
                "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop",
                "match", "mod", "move", "mut", "pub", "ref", "return", "self", "static",
                "struct", "super", "trait", "true", "type", "unsafe", "use", "where", "while",
            ],
            Self::JavaScript => &[
                "async", "await", "break", "case", "catch", "class", "const", "continue",
                "default", "delete", "do", "else", "export", "extends", "false", "finally",
                "for", "function", "if", "import", "in", "instanceof", "let", "new", "null",
                "of", "return", "static", "super", "switch", "this", "throw", "true", "try",
                "typeof", "var", "void", "while", "yield",
            ],
        }
    }

    fn comment_pattern(self) -> &'static str {
        match self {
            Self::Python => r"#[^\n]*",
            Self::Rust | Self::JavaScript => r"//[^\n]*",
        }
    }
}

/// Single-line string literals: double-, single-, and backtick-quoted, non-greedy via
/// negated character classes.
const STRING_PATTERN: &str = r#""[^"\n]*"|'[^'\n]*'|`[^`\n]*`"#;

/// A language profile compiled and ready for matching.
struct Profile {
    comment: Regex,
    string: Regex,
    keyword: Regex,
}

impl Profile {
    fn compile(lang: Language) -> Result<Self> {
        let keyword = format!(r"\b(?:{})\b", lang.keywords().join("|"));
        Ok(Self {
            comment: Regex::new(lang.comment_pattern())
                .with_context(|| format!("compiling comment pattern for {lang:?}"))?,
            string: Regex::new(STRING_PATTERN)
                .with_context(|| format!("compiling string pattern for {lang:?}"))?,
            keyword: Regex::new(&keyword)
                .with_context(|| format!("compiling keyword pattern for {lang:?}"))?,
        })
    }
}

/// Computes highlight spans for the current language, full snapshot at a time.
///
/// One left-to-right tokenizing pass: at each point the earliest match wins, ties broken
/// comment > string > keyword. A keyword inside a string or comment is therefore never
/// tagged on its own, and the output is mutually exclusive by construction. No incremental
/// re-tagging; every call recomputes from scratch.
#[derive(Default)]
pub struct Highlighter {
    profile: Option<Profile>,
    language: Option<Language>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select (or clear) the language profile. Called when the host opens a file and has
    /// derived a hint from its extension.
    pub fn set_language(&mut self, lang: Option<Language>) -> Result<()> {
        self.profile = match lang {
            Some(l) => Some(Profile::compile(l)?),
            None => None,
        };
        self.language = lang;
        Ok(())
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Classify the snapshot. With no language selected this returns no spans.
    pub fn highlight(&self, text: &str) -> Vec<HighlightSpan> {
        let Some(profile) = &self.profile else {
            return Vec::new();
        };

        let mut spans = Vec::new();
        let mut at = 0usize; // byte offset of the scan point
        while at < text.len() {
            let tail = &text[at..];
            let mut best: Option<(usize, usize, TagKind)> = None;
            let candidates = [
                (&profile.comment, TagKind::Comment),
                (&profile.string, TagKind::StringLit),
                (&profile.keyword, TagKind::Keyword),
            ];
            for (re, kind) in candidates {
                if let Some(m) = re.find(tail) {
                    // Strictly-earlier only: on a tie the first candidate (highest
                    // precedence) stays.
                    if best.map_or(true, |(s, _, _)| at + m.start() < s) {
                        best = Some((at + m.start(), at + m.end(), kind));
                    }
                }
            }
            let Some((start, end, kind)) = best else {
                break;
            };
            spans.push(HighlightSpan {
                start: byte_to_char_index(text, start),
                end: byte_to_char_index(text, end),
                kind,
            });
            at = end.max(start + 1);
        }
        spans
    }
}
