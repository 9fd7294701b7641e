//! CLI-specific error types and exit code mapping

use pomsynth_core::error::PomsynthError;
use pomsynth_generator::GeneratorError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Generation aborted for a non-filesystem reason (e.g. rendering).
    #[error("generate error: {0}")]
    Generate(String),

    /// Scan root unreadable or output file could not be written.
    #[error("filesystem error: {0}")]
    Filesystem(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from pomsynth-core.
    #[error("{0}")]
    Core(#[from] PomsynthError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                   |
    /// |------|-------------------------------------------|
    /// | 0    | Success (including "nothing to write")    |
    /// | 1    | General / command error                   |
    /// | 2    | Configuration error                       |
    /// | 10   | IO error (scan root, output file, stdout) |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Filesystem(_) | Self::Io(_) => 10,
            Self::Core(PomsynthError::Config(_)) => 2,
            Self::Core(PomsynthError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Generate(_) | Self::Core(_) => 1,
        }
    }
}

impl From<GeneratorError> for CliError {
    fn from(e: GeneratorError) -> Self {
        match e {
            GeneratorError::Config { .. } => Self::Config(e.to_string()),
            GeneratorError::ScanRoot { .. }
            | GeneratorError::NotADirectory(_)
            | GeneratorError::Output { .. } => Self::Filesystem(e.to_string()),
            GeneratorError::Discovery(_) | GeneratorError::Render(_) => {
                Self::Generate(e.to_string())
            }
        }
    }
}
