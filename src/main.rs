//! jscc - single-file build tool for Closure-style JavaScript projects
//!
//! Orchestrates the external Closure toolchain (depswriter + closurebuilder)
//! around one target file: swap in a transformed temp copy, build the
//! argument lists, run the tools, persist the artifact, and restore the
//! original file no matter how the run ends.

use clap::Parser;

mod args;
mod cli;
mod error;
mod orchestrator;
mod progress;
mod request;
mod roots;
mod runner;
mod settings;
mod swap;

use cli::Cli;
use error::Result;
use request::CompileRequest;
use runner::SystemRunner;
use settings::Settings;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let request = CompileRequest::new(cli.file, cli.compile, cli.deps)?;
    let settings = Settings::load(&request::file_directory(&request.target_file))?;
    let install_root = settings::install_root();

    orchestrator::run(&request, &settings, &install_root, &SystemRunner)
}
