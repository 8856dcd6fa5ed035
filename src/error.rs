//! Error handling for netbake.
//! Defines the error type and result alias shared by the scaffolder and the extractor.

use std::io;
use thiserror::Error;

/// Errors that can occur while scaffolding a project or extracting fields.
///
/// Everything is fatal for the binaries: the first error aborts the run and
/// nothing already written to disk is rolled back.
#[derive(Error, Debug)]
pub enum Error {
    /// File system operation failed
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// An external command exited with a non-zero status
    #[error("Command failed: '{command}'.")]
    CommandFailed { command: String, stderr: String },

    /// The external command was interrupted by the user
    #[error("Execution interrupted by the user.")]
    Interrupted,

    /// The generated project directory is missing when it should exist
    #[error("Project directory '{path}' does not exist. Check the --path and --api values.")]
    ProjectNotFound { path: String },

    /// Invalid user input (e.g. an empty project name)
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Invalid pattern set or other configuration problem
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The PDF could not be turned into text
    #[error("PDF error: {0}.")]
    PdfError(String),

    #[error("Template render error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Interactive prompt failed (closed terminal, no tty, ...)
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error. A user interrupt is a clean exit.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Interrupted => 0,
            _ => 1,
        }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message (and captured stderr for failed commands) to
/// stderr, then exits with [`Error::exit_code`].
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    if let Error::CommandFailed { stderr, .. } = &err {
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            eprintln!("STDERR: {stderr}");
        }
    }
    std::process::exit(err.exit_code());
}
