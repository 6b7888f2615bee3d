//! File-backed persistence of the session blob.
//!
//! SYSTEM CONTEXT
//! ==============
//! The CLI keeps the same JSON blob the browser keeps in `localStorage`, in a
//! single file, so consecutive invocations share one session. A missing file
//! means "signed out". I/O failures are logged and otherwise ignored.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use marketplace::SessionStorage;

/// Session file used when none is configured.
pub const DEFAULT_SESSION_FILE: &str = ".marketplace-session.json";

/// `SessionStorage` over one JSON file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, raw: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(raw.as_bytes())
    }
}

impl SessionStorage for FileStorage {
    fn read_raw(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                None
            }
        }
    }

    fn write_raw(&self, raw: &str) {
        if let Err(e) = self.write_file(raw) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session");
        }
    }

    fn remove(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove session file"),
        }
    }
}
