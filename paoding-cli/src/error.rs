//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// A literal input path does not exist
    FileNotFound(String),
    /// A glob pattern could not be parsed
    InvalidPattern(String),
    /// An encoding label `encoding_rs` does not know
    UnknownEncoding(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::UnknownEncoding(label) => write!(f, "Unknown encoding: {label}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("语料.txt".to_string()).to_string(),
            "File not found: 语料.txt"
        );
        assert_eq!(
            CliError::InvalidPattern("[oops".to_string()).to_string(),
            "Invalid file pattern: [oops"
        );
        assert_eq!(
            CliError::UnknownEncoding("klingon".to_string()).to_string(),
            "Unknown encoding: klingon"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = CliError::UnknownEncoding("x".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::UnknownEncoding(_))
        ));
    }
}
