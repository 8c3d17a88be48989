//! `npad` — the editing core behind a small desktop notepad shell.
//!
//! The shell (widgets, menus, dialogs, key bindings) lives elsewhere and treats this crate
//! as the place where the actual state-machine logic and failure handling happen.
//!
//! ## Reading guide (high level architecture)
//! - **`document::Document`**: the text snapshot plus dirty flag, on-disk path, line-ending
//!   preservation, and the one-shot autosave-prompt gate.
//! - **`search`**: stateful incremental find; `SearchState` is the cursor a find dialog
//!   keeps alive across next/previous presses.
//! - **`replace`**: one-shot and global substitution, literal or regex; `PatternError` is
//!   the only error and it must reach the user.
//! - **`highlight::Highlighter`**: one tokenizing pass over the snapshot producing disjoint
//!   keyword/string/comment spans for the selected language.
//! - **`autosave::AutosaveScheduler`**: the timed loop — polls the dirty flag on every
//!   tick, saves silently, prompts once for a location, and always re-arms itself.
//! - **`file_ops::PersistenceGateway`**: whole-file UTF-8 read/write seam; `FsGateway` is
//!   the real one.
//! - **`config::Settings`**: the recognized options and their TOML round-trip.
//!
//! All public offsets are **char offsets** into the snapshot; `utils` holds the byte↔char
//! conversions everything slices through.

pub mod autosave;
pub mod config;
pub mod document;
pub mod file_ops;
pub mod highlight;
pub mod replace;
pub mod search;
pub mod utils;

pub use autosave::{AutosaveScheduler, AutosaveUi, PromptChoice, Timer, TimerHandle};
pub use config::Settings;
pub use document::{Document, LineEnding};
pub use file_ops::{FsGateway, PersistenceGateway};
pub use highlight::{HighlightSpan, Highlighter, Language, TagKind};
pub use replace::{replace_all, replace_one, PatternError, ReplaceSpec};
pub use search::{find_next, MatchRange, SearchState};
