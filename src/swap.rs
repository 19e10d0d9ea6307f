//! Atomic substitution of the target file during compilation
//!
//! The compiler must see the transformed temp copy and must NOT see the
//! original alongside it, so the original is renamed to an ignore path for
//! the duration of the build. The invariant: at most one of
//! {original, ignore file} exists at any time, exactly one after the swap,
//! and the original again after restore. `SwapGuard` restores on normal
//! completion and on unwinding faults (`Drop`); an interrupt handler
//! restores the currently armed swap before the process exits.
//!
//! No cross-process locking: concurrent invocations against the same
//! target file are unsupported.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, Once};

use crate::error::{JsccError, Result};
use crate::request::BuildPaths;

/// The swap currently live in this process, if any. Signal handlers are
/// process-global, so the handler consults this registry instead of
/// capturing any one invocation's paths.
static ACTIVE_SWAP: Mutex<Option<BuildPaths>> = Mutex::new(None);
static INTERRUPT_HOOK: Once = Once::new();

/// A target file swapped aside for compilation.
///
/// Restores on drop, so the original survives faults raised anywhere
/// between `enter` and the end of the compile step.
#[derive(Debug)]
pub struct SwapGuard {
    paths: BuildPaths,
    directive: String,
    restored: bool,
}

impl SwapGuard {
    /// Read the target, write the transformed temp copy, move the target
    /// aside.
    ///
    /// A leading `#!` line is withheld from the temp copy (a bare newline
    /// keeps diagnostic line numbers aligned) and reattached to the final
    /// artifact by the caller. If moving the target fails, the temp copy
    /// written just before is removed again before the error propagates.
    ///
    /// The interrupt registry is armed before the first write so a signal
    /// landing mid-swap still cleans up whatever exists.
    pub fn enter(paths: &BuildPaths) -> Result<Self> {
        arm(paths);
        match Self::swap_in(paths) {
            Ok(guard) => Ok(guard),
            Err(e) => {
                disarm();
                Err(e)
            }
        }
    }

    fn swap_in(paths: &BuildPaths) -> Result<Self> {
        let contents =
            fs::read_to_string(&paths.target_file).map_err(|e| JsccError::FileReadFailed {
                path: paths.target_file.display().to_string(),
                reason: e.to_string(),
            })?;

        let (directive, body) = split_directive(&contents);

        fs::write(&paths.temp_file, body).map_err(|e| JsccError::FileWriteFailed {
            path: paths.temp_file.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Err(e) = fs::rename(&paths.target_file, &paths.ignore_file) {
            remove_if_exists(&paths.temp_file);
            return Err(JsccError::FileRenameFailed {
                from: paths.target_file.display().to_string(),
                to: paths.ignore_file.display().to_string(),
                reason: e.to_string(),
            });
        }

        Ok(Self {
            paths: paths.clone(),
            directive,
            restored: false,
        })
    }

    /// The withheld interpreter directive, empty when the target had none.
    pub fn directive(&self) -> &str {
        &self.directive
    }

    /// Undo the swap. Idempotent; also runs on drop.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        restore_swapped(&self.paths);
        disarm();
    }
}

impl Drop for SwapGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Best-effort reversal of a swap: remove the temp copy, move the ignore
/// file back. Acts only on files that actually exist, so it is safe when
/// the swap never completed and safe to run repeatedly.
pub fn restore_swapped(paths: &BuildPaths) {
    if paths.temp_file.exists() {
        remove_if_exists(&paths.temp_file);
    }
    if paths.ignore_file.exists() {
        if let Err(e) = fs::rename(&paths.ignore_file, &paths.target_file) {
            eprintln!(
                "Warning: failed to restore {}: {}",
                paths.target_file.display(),
                e
            );
        }
    }
}

fn remove_if_exists(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            eprintln!("Warning: failed to remove {}: {}", path.display(), e);
        }
    }
}

/// Register `paths` as the swap an interrupt must undo. The handler is
/// installed once per process, before any mutation it could race with.
fn arm(paths: &BuildPaths) {
    INTERRUPT_HOOK.call_once(|| {
        let result = ctrlc::set_handler(|| {
            if let Ok(mut active) = ACTIVE_SWAP.lock() {
                if let Some(paths) = active.take() {
                    restore_swapped(&paths);
                }
            }
            std::process::exit(130);
        });
        if let Err(e) = result {
            eprintln!("Warning: interrupt cleanup unavailable: {e}");
        }
    });

    if let Ok(mut active) = ACTIVE_SWAP.lock() {
        *active = Some(paths.clone());
    }
}

fn disarm() {
    if let Ok(mut active) = ACTIVE_SWAP.lock() {
        *active = None;
    }
}

/// Split a leading interpreter directive off `contents`.
///
/// Returns the directive (with its newline) and the body to hand to the
/// compiler. A `#!` anywhere but offset 0 is not a directive. A directive
/// with no trailing newline is the whole content.
fn split_directive(contents: &str) -> (String, String) {
    if !contents.starts_with("#!") {
        return (String::new(), contents.to_string());
    }
    match contents.find('\n') {
        Some(end) => (
            contents[..=end].to_string(),
            format!("\n{}", &contents[end + 1..]),
        ),
        None => (contents.to_string(), "\n".to_string()),
    }
}
