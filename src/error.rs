//! Error handling for plugin-maker.
//! Defines the error type and result alias used throughout the generator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a plugin component.
///
/// Every variant except [`Error::MissingParameter`] aborts the run before
/// any file is written.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the template engine
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Required parameters are absent or underspecified
    #[error("Missing parameter: {0}.")]
    MissingParameter(String),

    /// The definition file has no block introduced by the marker
    #[error("Vocabulary marker '{marker}' not found in '{path}'.")]
    VocabularyNotFound { marker: String, path: PathBuf },

    /// A line inside a vocabulary block does not look like an enum entry
    #[error("Malformed entry at {path}:{line}: '{content}'.")]
    MalformedEntry {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// An index does not address an entry of the named vocabulary
    #[error("Index {index} is out of range for {vocabulary} (0..{len}).")]
    IndexOutOfRange {
        vocabulary: String,
        index: usize,
        len: usize,
    },

    /// A template file expected by the project layout is absent
    #[error("Template not found: '{}'.", .0.display())]
    MissingTemplate(PathBuf),

    /// A shared project file (definition file, registry header, build manifest) is absent
    #[error("Shared project file not found: '{}'.", .0.display())]
    MissingSharedFile(PathBuf),

    /// A template references slots the renderer does not provide
    #[error("Template '{template}' references unknown slots: {}.", .slots.join(", "))]
    UnknownSlot {
        template: String,
        slots: Vec<String>,
    },

    /// The build manifest lacks the section that lists plugin directories
    #[error("Section '{marker}' not found in build manifest '{}'.", .path.display())]
    ManifestSectionNotFound { marker: String, path: PathBuf },

    /// Represents failures of the interactive prompt
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Missing parameters are reported with a help hint and exit with status 2;
/// any other error exits with status 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    match err {
        Error::MissingParameter(_) => {
            eprintln!("use --help for help");
            std::process::exit(2);
        }
        _ => std::process::exit(1),
    }
}
