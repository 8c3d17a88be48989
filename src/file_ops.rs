//! File persistence: the gateway seam and its `std::fs` implementation.

use anyhow::{Context, Result}; // anyhow error handling
use std::collections::HashMap; // in-memory gateway storage
use std::fs; // file system access
use std::path::Path; // file path handling

/// Whole-file UTF-8 persistence.
///
/// The trait exists so callers that must not care where bytes go — the autosave scheduler
/// above all — can be driven against an in-memory implementation in tests. No atomic-write
/// or backup guarantee: a write is a plain whole-file overwrite.
pub trait PersistenceGateway {
    fn read(&mut self, path: &Path) -> Result<String>;
    fn write(&mut self, path: &Path, text: &str) -> Result<()>;
}

/// The real gateway: reads and writes the local file system.
#[derive(Debug, Default)]
pub struct FsGateway;

impl PersistenceGateway for FsGateway {
    fn read(&mut self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&mut self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, text).with_context(|| format!("Failed writing {}", path.display()))
    }
}

/// Test double: a path → contents map. Can be told to fail writes, which is how the
/// autosave tests exercise the swallow-and-retry policy.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    files: HashMap<std::path::PathBuf, String>,
    pub fail_writes: bool,
    pub write_count: usize,
}

impl MemoryGateway {
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.get(path.as_ref()).cloned()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn read(&mut self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&mut self, path: &Path, text: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Failed writing {}", path.display());
        }
        self.write_count += 1;
        self.files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_gateway_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let mut gw = FsGateway;
        gw.write(&path, "hello\n").unwrap();
        assert_eq!(gw.read(&path).unwrap(), "hello\n");
    }

    #[test]
    fn fs_gateway_read_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");
        let mut gw = FsGateway;
        let err = gw.read(&path).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.txt"));
    }

    #[test]
    fn memory_gateway_can_fail_writes() {
        let mut gw = MemoryGateway {
            fail_writes: true,
            ..MemoryGateway::default()
        };
        assert!(gw.write(Path::new("x"), "y").is_err());
        assert_eq!(gw.write_count, 0);
    }
}
