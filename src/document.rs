//! The document model: a whole-text snapshot plus the bookkeeping the shell needs.

use crate::file_ops::PersistenceGateway; // persistence seam
use crate::utils::char_to_byte_index; // utf-8 index conversion
use anyhow::Result; // anyhow error handling
use std::path::{Path, PathBuf}; // file path handling

/// The character sequence used to separate lines in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix line ending: `\n` (LF)
    LF,
    /// Windows line ending: `\r\n` (CRLF)
    CRLF,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LF => "\n",
            Self::CRLF => "\r\n",
        }
    }
}

/// A document: the full text, where it lives on disk, and whether it has unsaved changes.
///
/// The text is kept LF-normalized internally; the detected line ending is reapplied when
/// serializing for disk. Every engine in this crate (search, replace, highlight) takes the
/// text snapshot by reference and leaves mutation to the methods here, which is what keeps
/// the dirty flag honest: set on any edit, cleared only by a successful save.
pub struct Document {
    text: String,
    /// Path we'll save to. `None` until the first save-as.
    pub path: Option<PathBuf>,
    /// "Dirty" means there are unsaved changes.
    dirty: bool,
    pub line_ending: LineEnding,
    /// Whether the one-shot "choose an autosave location" prompt has fired for this
    /// document. Lives here so that new/open resets it by construction.
    pub autosave_prompted: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty, pathless document.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            path: None,
            dirty: false,
            line_ending: LineEnding::LF,
            autosave_prompted: false,
        }
    }

    /// Build a document from an on-disk string, detecting and honoring line endings.
    pub fn from_string(s: &str) -> Self {
        let line_ending = if s.contains("\r\n") {
            LineEnding::CRLF
        } else {
            LineEnding::LF
        };
        Self {
            text: s.replace("\r\n", "\n"),
            path: None,
            dirty: false,
            line_ending,
            autosave_prompted: false,
        }
    }

    /// Read `path` through the gateway and produce a clean document bound to it.
    pub fn open(gateway: &mut dyn PersistenceGateway, path: PathBuf) -> Result<Self> {
        let s = gateway.read(&path)?;
        let mut doc = Self::from_string(&s);
        doc.path = Some(path);
        Ok(doc)
    }

    /// The current text snapshot (LF line endings).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Serialize for saving to disk, using the detected line ending.
    pub fn to_disk_string(&self) -> String {
        match self.line_ending {
            LineEnding::LF => self.text.clone(),
            LineEnding::CRLF => self.text.replace('\n', LineEnding::CRLF.as_str()),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as having unsaved changes (the host calls this on edits it makes
    /// directly in its widget, mirroring the snapshot afterwards with [`Self::set_text`]).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the entire text. Marks the document dirty.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Insert `s` at a char offset. Marks the document dirty.
    pub fn insert(&mut self, char_idx: usize, s: &str) {
        let bi = char_to_byte_index(&self.text, char_idx);
        self.text.insert_str(bi, s);
        self.dirty = true;
    }

    /// Delete the half-open char range `start..end`. Marks the document dirty.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let b0 = char_to_byte_index(&self.text, start);
        let b1 = char_to_byte_index(&self.text, end.max(start));
        self.text.replace_range(b0..b1, "");
        self.dirty = true;
    }

    /// Save to the document's known path. Callers must only invoke this when a path is
    /// bound; a pathless document is the save-as prompt's job, not ours.
    pub fn save(&mut self, gateway: &mut dyn PersistenceGateway) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no file path bound to document"))?;
        self.save_to(gateway, &path)
    }

    /// Save to a specific path and bind the document to it. Clears the dirty flag on
    /// success; errors propagate to the caller (explicit saves must report failures).
    pub fn save_to(&mut self, gateway: &mut dyn PersistenceGateway, path: &Path) -> Result<()> {
        gateway.write(path, &self.to_disk_string())?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }
}
