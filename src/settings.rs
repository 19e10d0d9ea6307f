//! Project settings from `closure.json`
//!
//! A `closure.json` next to the target file configures the toolchain:
//! where the base library lives, an optional compiler jar override, extra
//! search roots, extra dependency files, and raw backend flags. Every key
//! is optional; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use crate::error::{JsccError, Result};

/// Settings file name, looked up in the target file's directory
pub const SETTINGS_FILE: &str = "closure.json";

/// Key-value settings bag consulted for compiler paths, roots, and flags
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Root of the shared base library
    pub closure_base_path: Option<PathBuf>,

    /// Compiler jar override (key spelling is historical)
    #[serde(rename = "compiler_jar")]
    pub compiler_jar: Option<PathBuf>,

    /// Extra compiler search roots
    pub additional_compile_roots: Vec<PathBuf>,

    /// Extra dependency files; their directories are used as roots only
    /// when no explicit roots are configured
    pub additional_deps: Vec<PathBuf>,

    /// Raw backend compiler flags, appended verbatim
    pub additional_compile_options: Vec<String>,
}

impl Settings {
    /// Load settings from `closure.json` in `dir`, defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| JsccError::SettingsReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| JsccError::SettingsParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Base-library root: configured, or the copy shipped with the tool.
    pub fn closure_base(&self) -> PathBuf {
        self.closure_base_path
            .clone()
            .unwrap_or_else(|| install_root().join("third_party").join("closure-library"))
    }

    /// Compiler jar: configured, or the jar shipped with the tool.
    pub fn compiler_jar_path(&self) -> PathBuf {
        self.compiler_jar
            .clone()
            .unwrap_or_else(|| install_root().join("third_party").join("compiler.jar"))
    }
}

/// Directory the tool's own `lib/`, `bin/`, and `third_party/` assets
/// resolve against: `$JSCC_ROOT` when set, otherwise one level above the
/// executable's directory.
pub fn install_root() -> PathBuf {
    if let Some(root) = env::var_os("JSCC_ROOT") {
        return PathBuf::from(root);
    }
    env::current_exe()
        .ok()
        .and_then(|exe| Some(exe.parent()?.parent()?.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
