//! Deduplicated compiler search roots
//!
//! Several configured roots can resolve to the same directory through
//! symlinks or relative spellings; the external tools reject duplicate
//! `--root` arguments, so each root is canonicalized and registered once
//! per invocation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{JsccError, Result};

/// Canonical roots already registered during this invocation
#[derive(Debug, Default)]
pub struct RootSet {
    seen: HashSet<PathBuf>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `path` (resolving symlinks) and record it.
    ///
    /// Returns `Ok(None)` when the canonical form was already registered,
    /// `Ok(Some(canonical))` on first sight. A nonexistent path is an
    /// error: silently skipping a required compiler root corrupts the
    /// build, so resolution failures propagate.
    pub fn register(&mut self, path: &Path) -> Result<Option<PathBuf>> {
        let canonical = dunce::canonicalize(path).map_err(|e| JsccError::RootNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if !self.seen.insert(canonical.clone()) {
            return Ok(None);
        }
        Ok(Some(canonical))
    }
}
