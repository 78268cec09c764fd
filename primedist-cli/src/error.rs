//! Error handling for the primedist CLI

use thiserror::Error;
use std::path::PathBuf;

use primedist_core::DistanceError;

/// Main error type for primedist CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Distance error: {0}")]
    Distance(#[from] DistanceError),

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Compressed inputs must end in .gz",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Primers and reads must be FASTA or FASTQ\n\
                 • Use --format tsv or --format json for scan output"
            );
        }

        CliError::Distance(DistanceError::InvalidArgument(_)) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Sequences must be non-empty\n\
                 • Hamming distance needs sequences of equal length\n\
                 • --end-matches (-m) cannot exceed the primer length"
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your primedist.toml configuration file\n\
                 • Use 'primedist config --example' to generate a sample configuration"
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("primers.fa"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_distance_error_conversion() {
        let err: CliError = DistanceError::invalid_argument("empty query").into();
        assert!(matches!(err, CliError::Distance(_)));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("equal length"));
    }

    #[test]
    fn test_config_error_suggestions() {
        let err = CliError::config("bad value");
        assert!(format_error_with_suggestions(&err).contains("primedist config --example"));
    }
}
