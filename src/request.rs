//! Compile request and the paths derived from the target file
//!
//! All working files are derived from the target by suffix substitution:
//! `foo.js` -> `foo.tmp.js` (compiler input), `foo.min.js` (artifact),
//! `foo.ignorejs` (original moved aside), plus `deps.js` next to the
//! artifact. Derived once per request, never mutated.

use std::path::{Path, PathBuf};

use crate::error::{JsccError, Result};

/// What a single invocation was asked to do
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// The JS file to compile
    pub target_file: PathBuf,
    /// Write the <file>.min.js artifact (otherwise compile for warnings only)
    pub produce_artifact: bool,
    /// Write a deps.js manifest before compiling
    pub produce_deps: bool,
}

impl CompileRequest {
    /// Validate CLI options into a request.
    ///
    /// Fails fast when no target was supplied, or when the target does not
    /// carry a `.js` suffix: the derived temp/ignore names would collapse
    /// onto the target itself and the swap would destroy the source.
    pub fn new(
        target_file: Option<PathBuf>,
        produce_artifact: bool,
        produce_deps: bool,
    ) -> Result<Self> {
        let target_file = target_file.ok_or(JsccError::MissingTarget)?;
        if target_file.as_os_str().is_empty() {
            return Err(JsccError::MissingTarget);
        }

        let name = target_file.file_name().and_then(|n| n.to_str());
        if !name.is_some_and(|n| n.ends_with(".js")) {
            return Err(JsccError::InvalidTarget {
                path: target_file.display().to_string(),
            });
        }

        Ok(Self {
            target_file,
            produce_artifact,
            produce_deps,
        })
    }
}

/// Working-file paths for one invocation
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// The file requested for compilation
    pub target_file: PathBuf,
    /// Transformed copy handed to the compiler
    pub temp_file: PathBuf,
    /// Compiled artifact destination
    pub compiled_file: PathBuf,
    /// The target renamed aside for the duration of the build
    pub ignore_file: PathBuf,
    /// Dependency manifest destination
    pub deps_file: PathBuf,
}

impl BuildPaths {
    /// Derive all working-file paths from a validated request.
    pub fn derive(request: &CompileRequest) -> Self {
        let target = &request.target_file;
        let compiled_file = with_suffix(target, ".min.js");
        Self {
            target_file: target.clone(),
            temp_file: with_suffix(target, ".tmp.js"),
            ignore_file: with_suffix(target, ".ignorejs"),
            deps_file: file_directory(&compiled_file).join("deps.js"),
            compiled_file,
        }
    }
}

/// Swap the `.js` suffix of `path`'s file name for `suffix`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let stem = name.strip_suffix(".js").unwrap_or(name);
    path.with_file_name(format!("{stem}{suffix}"))
}

/// Directory containing `path`, `.` for bare file names.
pub fn file_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
