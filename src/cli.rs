//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::Parser;
use std::path::PathBuf;

/// jscc - single-file build tool for Closure-style JavaScript projects
///
/// Compiles one JS file through the Closure build toolchain, preserving a
/// leading shebang line and restoring the source on every outcome.
#[derive(Parser, Debug)]
#[command(
    name = "jscc",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Compile a single JS file with the Closure build toolchain",
    long_about = "jscc compiles one JavaScript file through the Closure toolchain \
                  (depswriter + closurebuilder), handling search-root setup, shebang \
                  preservation, and guaranteed restoration of the source file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  jscc -c src/app.js\n    \
                  jscc -c -d src/app.js\n    \
                  jscc src/app.js\n\n\
                  \x1b[1m\x1b[32mSettings:\x1b[0m\n    \
                  Place a closure.json next to the target file to configure\n    \
                  closureBasePath, compiler_jar, additionalCompileRoots,\n    \
                  additionalDeps and additionalCompileOptions."
)]
pub struct Cli {
    /// Produce the <file>.min.js artifact. If omitted the code is still
    /// compiled and warnings shown; the compiled file is just not written
    #[arg(long, short = 'c')]
    pub compile: bool,

    /// Produce a deps.js file before compiling
    #[arg(long, short = 'd')]
    pub deps: bool,

    /// The JS file to compile
    pub file: Option<PathBuf>,
}
