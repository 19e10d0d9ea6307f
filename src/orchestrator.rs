//! Build sequencing: optional deps step, then the compile step
//!
//! The deps step, when requested, fully completes before compilation
//! starts; its subprocess failing is surfaced but never suppresses the
//! compile step. The compile step owns the file swap; the swap guard plus
//! the interrupt registry it arms guarantee the original file is back in
//! place on every exit path.

use std::path::Path;

use console::Style;

use crate::args;
use crate::error::Result;
use crate::progress::StepProgress;
use crate::request::{BuildPaths, CompileRequest};
use crate::roots::RootSet;
use crate::runner::{self, CommandRunner};
use crate::settings::Settings;
use crate::swap::SwapGuard;

/// Run one full invocation against `request`.
pub fn run(
    request: &CompileRequest,
    settings: &Settings,
    install_root: &Path,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let paths = BuildPaths::derive(request);

    if request.produce_deps {
        run_deps_step(&paths, settings, runner)?;
    }
    run_compile_step(request, &paths, settings, install_root, runner)
}

/// Write the dependency manifest. Best-effort: a failed subprocess has
/// been reported already and does not block compilation.
fn run_deps_step(
    paths: &BuildPaths,
    settings: &Settings,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let mut roots = RootSet::new();
    let deps_args = args::deps_args(paths, settings, &mut roots)?;
    let tool = args::deps_writer(settings);

    let progress = StepProgress::start(format!("Writing {}", paths.deps_file.display()));
    let result = runner::run_tool(
        runner,
        &tool,
        &deps_args,
        Some(&paths.deps_file),
        "",
        None,
    );
    match &result {
        Ok(status) if status.succeeded => progress.finish(),
        _ => progress.abandon(),
    }

    let status = result?;
    if status.succeeded && status.artifact_written {
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("Wrote"),
            paths.deps_file.display()
        );
    }
    Ok(())
}

/// Swap the target aside, compile the temp copy, restore.
fn run_compile_step(
    request: &CompileRequest,
    paths: &BuildPaths,
    settings: &Settings,
    install_root: &Path,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let mut guard = SwapGuard::enter(paths)?;

    let mut roots = RootSet::new();
    let compile_args = args::compile_args(paths, settings, install_root, &mut roots)?;
    let tool = args::closure_builder(settings);
    let output_target = request
        .produce_artifact
        .then_some(paths.compiled_file.as_path());

    let progress = StepProgress::start(format!("Compiling {}", paths.target_file.display()));
    let filter = |diagnostics: &str| runner::strip_preamble(&compile_args, diagnostics);
    let result = runner::run_tool(
        runner,
        &tool,
        &compile_args,
        output_target,
        guard.directive(),
        Some(&filter),
    );
    match &result {
        Ok(status) if status.succeeded => progress.finish(),
        _ => progress.abandon(),
    }

    guard.restore();

    let status = result?;
    if status.succeeded && status.artifact_written {
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("Compiled"),
            paths.compiled_file.display()
        );
    }
    Ok(())
}
