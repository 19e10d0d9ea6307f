//! Argument lists for the external build tools
//!
//! Both builders follow the same shape: register a primary root, register
//! configured extra roots, append fixed flags. Root arguments must precede
//! the `--input`/output flags or the external tools resolve nothing, so
//! insertion order is preserved throughout.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::request::{BuildPaths, file_directory};
use crate::roots::RootSet;
use crate::settings::Settings;

/// Wrapper emitted around compiled output so a global `window` alias
/// exists before any emitted code runs.
const OUTPUT_WRAPPER: &str = "(function() {this.window=this;%output%})();";

/// Path of the dependency-graph writer under the base library.
pub fn deps_writer(settings: &Settings) -> PathBuf {
    build_tool(settings, "depswriter.py")
}

/// Path of the compiling builder under the base library.
pub fn closure_builder(settings: &Settings) -> PathBuf {
    build_tool(settings, "closurebuilder.py")
}

fn build_tool(settings: &Settings, name: &str) -> PathBuf {
    settings
        .closure_base()
        .join("closure")
        .join("bin")
        .join("build")
        .join(name)
}

/// Arguments for the dependency-graph step.
///
/// Roots use the `--root_with_prefix` form: the as-configured spelling is
/// the prefix label the deps tool path-maps generated references with. The
/// output destination is not part of the list; the caller supplies it when
/// persisting the tool's stdout.
pub fn deps_args(paths: &BuildPaths, settings: &Settings, roots: &mut RootSet) -> Result<Vec<String>> {
    let mut args = Vec::new();
    push_root(&mut args, roots, &file_directory(&paths.target_file), true)?;
    push_configured_roots(&mut args, roots, settings, true)?;
    Ok(args)
}

/// Arguments for the compile step.
///
/// Root order: base library, temp file's directory, the tool's own `lib/`
/// and `bin/` roots, then configured extras. Then the input/output flags
/// and the fixed backend flag block.
pub fn compile_args(
    paths: &BuildPaths,
    settings: &Settings,
    install_root: &Path,
    roots: &mut RootSet,
) -> Result<Vec<String>> {
    let base = settings.closure_base();
    let lib_root = install_root.join("lib");
    let bin_root = install_root.join("bin");

    let mut args = Vec::new();
    push_root(&mut args, roots, &base, false)?;
    push_root(&mut args, roots, &file_directory(&paths.temp_file), false)?;
    push_root(&mut args, roots, &lib_root, false)?;
    push_root(&mut args, roots, &bin_root, false)?;
    push_configured_roots(&mut args, roots, settings, false)?;

    args.push(format!("--input={}", paths.temp_file.display()));
    args.push("--output_mode=compiled".to_string());
    args.push(format!(
        "--compiler_jar={}",
        settings.compiler_jar_path().display()
    ));

    args.push(format!(
        "--compiler_flags=--js={}",
        base.join("closure").join("goog").join("deps.js").display()
    ));
    args.push("--compiler_flags=--compilation_level=ADVANCED_OPTIMIZATIONS".to_string());
    args.push(format!(
        "--compiler_flags=--externs={}",
        lib_root.join("node.externs.js").display()
    ));
    args.push(format!(
        "--compiler_flags=--externs={}",
        lib_root.join("node.static.externs.js").display()
    ));
    args.push(format!("--compiler_flags=--output_wrapper={OUTPUT_WRAPPER}"));

    for opt in &settings.additional_compile_options {
        args.push(format!("--compiler_flags={opt}"));
    }

    Ok(args)
}

/// Register `path` and emit its root argument, skipping duplicates.
fn push_root(
    args: &mut Vec<String>,
    roots: &mut RootSet,
    path: &Path,
    with_prefix: bool,
) -> Result<()> {
    let Some(canonical) = roots.register(path)? else {
        return Ok(());
    };

    let root = if with_prefix {
        format!("--root_with_prefix={} {}", path.display(), canonical.display())
    } else {
        format!("--root={}", canonical.display())
    };
    args.push(root);
    Ok(())
}

/// Configured extra roots; directories guessed from extra dependency files
/// only when no explicit roots are configured.
fn push_configured_roots(
    args: &mut Vec<String>,
    roots: &mut RootSet,
    settings: &Settings,
    with_prefix: bool,
) -> Result<()> {
    if !settings.additional_compile_roots.is_empty() {
        for root in &settings.additional_compile_roots {
            push_root(args, roots, root, with_prefix)?;
        }
    } else {
        for dep in &settings.additional_deps {
            push_root(args, roots, &file_directory(dep), with_prefix)?;
        }
    }
    Ok(())
}
