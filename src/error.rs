//! Error types and handling for jscc
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

#![allow(dead_code)]

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for jscc operations
#[derive(Error, Diagnostic, Debug)]
pub enum JsccError {
    // Request errors
    #[error("No file specified")]
    #[diagnostic(
        code(jscc::request::missing_target),
        help("Usage: jscc [-c] [-d] <file.js>")
    )]
    MissingTarget,

    #[error("Not a .js file: {path}")]
    #[diagnostic(
        code(jscc::request::invalid_target),
        help("The temp/minified/ignore names are derived from the .js suffix")
    )]
    InvalidTarget { path: String },

    // Root resolution errors
    #[error("Compiler root not found: {path}")]
    #[diagnostic(
        code(jscc::roots::not_found),
        help("Check closureBasePath and additionalCompileRoots in closure.json")
    )]
    RootNotFound { path: String, reason: String },

    // Settings errors
    #[error("Failed to read settings file: {path}")]
    #[diagnostic(code(jscc::settings::read_failed))]
    SettingsReadFailed { path: String, reason: String },

    #[error("Failed to parse settings file: {path}")]
    #[diagnostic(code(jscc::settings::parse_failed))]
    SettingsParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(jscc::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(jscc::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to move file: {from} -> {to}")]
    #[diagnostic(code(jscc::fs::rename_failed))]
    FileRenameFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(jscc::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for JsccError {
    fn from(err: std::io::Error) -> Self {
        JsccError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, JsccError>;
