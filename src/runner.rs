//! External command execution and output post-processing
//!
//! The build tools are opaque commands: arguments in, diagnostics on
//! stderr, build product on stdout, non-zero exit on failure. The process
//! boundary is a trait so orchestration tests substitute a fake without
//! spawning anything.
//!
//! All user-facing text is scrubbed of the internal `.tmp.js` naming so
//! diagnostics point at the file the user actually edits.

use std::fs;
use std::path::Path;
use std::process::Command;

use console::Style;

use crate::error::{JsccError, Result};

/// Captured result of one external command
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// Failure diagnostic when the command did not succeed
    pub failure: Option<String>,
}

/// The opaque-process boundary
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> ToolOutput;
}

/// Real implementation over `std::process::Command`
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> ToolOutput {
        match Command::new(program).args(args).output() {
            Ok(output) => {
                let success = output.status.success();
                ToolOutput {
                    success,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    failure: (!success).then(|| {
                        format!("{} exited with {}", program.display(), output.status)
                    }),
                }
            }
            // A missing or unlaunchable tool is reported like any other
            // failed run; the orchestrator still completes its cleanup path.
            Err(e) => ToolOutput {
                success: false,
                stdout: String::new(),
                stderr: String::new(),
                failure: Some(format!("failed to run {}: {}", program.display(), e)),
            },
        }
    }
}

/// What one tool invocation amounted to
#[derive(Debug, Clone, Copy)]
pub struct ToolStatus {
    pub succeeded: bool,
    pub artifact_written: bool,
}

/// Run one external tool and post-process its output.
///
/// Failure diagnostics and stderr are scrubbed and surfaced on the error
/// channel; stdout, when non-empty and a target was requested, is
/// scrubbed, prefixed with the withheld directive, and persisted over any
/// prior content. No output target means the product is intentionally
/// discarded (warnings-only mode). Persisting happens whether or not the
/// command succeeded.
pub fn run_tool(
    runner: &dyn CommandRunner,
    program: &Path,
    args: &[String],
    output_target: Option<&Path>,
    prefix: &str,
    filter: Option<&dyn Fn(&str) -> String>,
) -> Result<ToolStatus> {
    let output = runner.run(program, args);

    if let Some(failure) = &output.failure {
        let red = Style::new().red().bold();
        eprintln!(
            "{}",
            red.apply_to(format!(
                "Error in command: {} {}",
                program.display(),
                scrub_temp_names(&args.join(" "))
            ))
        );
        eprintln!("{}", scrub_temp_names(failure));
    }

    if !output.stderr.is_empty() {
        let diagnostics = match filter {
            Some(f) => f(&output.stderr),
            None => output.stderr.clone(),
        };
        eprint!("{}", scrub_temp_names(&diagnostics));
        if !diagnostics.ends_with('\n') {
            eprintln!();
        }
    }

    let mut artifact_written = false;
    if !output.stdout.is_empty() {
        if let Some(target) = output_target {
            let product = format!("{prefix}{}", scrub_temp_names(&output.stdout));
            fs::write(target, product).map_err(|e| JsccError::FileWriteFailed {
                path: target.display().to_string(),
                reason: e.to_string(),
            })?;
            artifact_written = true;
        }
    }

    Ok(ToolStatus {
        succeeded: output.success,
        artifact_written,
    })
}

/// Rewrite the temp-file naming back to the user's file name.
pub fn scrub_temp_names(text: &str) -> String {
    text.replace(".tmp.js", ".js")
}

/// Strip the verbose preamble the backend echoes before its first real
/// diagnostic line.
///
/// Heuristic, not a documented protocol of the tool: the marker is the
/// last `--`-prefixed token of the final argument; when it appears in the
/// output, everything before the first newline at or after it is dropped.
/// Anything unexpected leaves the output unchanged.
pub fn strip_preamble(args: &[String], output: &str) -> String {
    let Some(last) = args.last() else {
        return output.to_string();
    };
    let Some(idx) = last.rfind("--") else {
        return output.to_string();
    };
    let marker = &last[idx..];
    let Some(found) = output.find(marker) else {
        return output.to_string();
    };
    match output[found..].find('\n') {
        Some(newline) => output[found + newline..].to_string(),
        None => output.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FakeRunner {
        output: ToolOutput,
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, _program: &Path, _args: &[String]) -> ToolOutput {
            self.output.clone()
        }
    }

    fn success_with(stdout: &str, stderr: &str) -> ToolOutput {
        ToolOutput {
            success: true,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            failure: None,
        }
    }

    #[test]
    fn test_scrub_temp_names() {
        assert_eq!(
            scrub_temp_names("src/foo.tmp.js:3: ERROR - bad foo.tmp.js"),
            "src/foo.js:3: ERROR - bad foo.js"
        );
        assert_eq!(scrub_temp_names("clean"), "clean");
    }

    #[test]
    fn test_strip_preamble_cuts_through_marker_line() {
        let args = vec![
            "--root=/lib".to_string(),
            "--compiler_flags=--output_wrapper=W".to_string(),
        ];
        let output = "cmd: java -jar c.jar --output_wrapper=W --more\nfoo.js:1: WARNING - x\n";
        assert_eq!(
            strip_preamble(&args, output),
            "\nfoo.js:1: WARNING - x\n"
        );
    }

    #[test]
    fn test_strip_preamble_marker_absent() {
        let args = vec!["--compiler_flags=--output_wrapper=W".to_string()];
        let output = "foo.js:1: WARNING - x\n";
        assert_eq!(strip_preamble(&args, output), output);
    }

    #[test]
    fn test_strip_preamble_no_dashes_in_last_arg() {
        let args = vec!["plain".to_string()];
        let output = "anything\n";
        assert_eq!(strip_preamble(&args, output), output);
    }

    #[test]
    fn test_strip_preamble_empty_args() {
        assert_eq!(strip_preamble(&[], "anything"), "anything");
    }

    #[test]
    fn test_strip_preamble_no_newline_after_marker() {
        let args = vec!["--compiler_flags=--debug".to_string()];
        let output = "preamble --debug and nothing else";
        assert_eq!(strip_preamble(&args, output), output);
    }

    #[test]
    fn test_run_tool_persists_prefixed_scrubbed_stdout() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("foo.min.js");
        let runner = FakeRunner {
            output: success_with("var a=1; // from foo.tmp.js\n", ""),
        };

        let status = run_tool(
            &runner,
            &PathBuf::from("tool"),
            &[],
            Some(&target),
            "#!/bin/env node\n",
            None,
        )
        .unwrap();

        assert!(status.succeeded);
        assert!(status.artifact_written);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "#!/bin/env node\nvar a=1; // from foo.js\n"
        );
    }

    #[test]
    fn test_run_tool_overwrites_prior_artifact() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("foo.min.js");
        fs::write(&target, "stale content that is much longer").unwrap();
        let runner = FakeRunner {
            output: success_with("new\n", ""),
        };

        run_tool(&runner, &PathBuf::from("tool"), &[], Some(&target), "", None).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
    }

    #[test]
    fn test_run_tool_empty_stdout_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("foo.min.js");
        let runner = FakeRunner {
            output: success_with("", "foo.js:1: WARNING - y\n"),
        };

        let status =
            run_tool(&runner, &PathBuf::from("tool"), &[], Some(&target), "", None).unwrap();
        assert!(!status.artifact_written);
        assert!(!target.exists());
    }

    #[test]
    fn test_run_tool_no_target_discards_stdout() {
        let runner = FakeRunner {
            output: success_with("var a=1;\n", ""),
        };

        let status = run_tool(&runner, &PathBuf::from("tool"), &[], None, "", None).unwrap();
        assert!(status.succeeded);
        assert!(!status.artifact_written);
    }

    #[test]
    fn test_run_tool_failure_still_completes() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("foo.min.js");
        let runner = FakeRunner {
            output: ToolOutput {
                success: false,
                stdout: "partial\n".to_string(),
                stderr: "foo.tmp.js:9: ERROR - z\n".to_string(),
                failure: Some("tool exited with exit status: 1".to_string()),
            },
        };

        let status =
            run_tool(&runner, &PathBuf::from("tool"), &[], Some(&target), "", None).unwrap();
        assert!(!status.succeeded);
        // stdout is persisted even when the command failed
        assert!(status.artifact_written);
        assert_eq!(fs::read_to_string(&target).unwrap(), "partial\n");
    }

    #[test]
    fn test_system_runner_reports_missing_program_as_failure() {
        let runner = SystemRunner;
        let output = runner.run(Path::new("/nonexistent/jscc-tool"), &[]);
        assert!(!output.success);
        assert!(output.failure.is_some());
    }
}
