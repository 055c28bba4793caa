//! Error handling for the CivicReport CLI
//!
//! Preserves error context while mapping engine failures onto the exit
//! codes a calling shell expects.

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use civicreport::CivicReportError;
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from an engine error, choosing the exit code from
    /// its kind: validation and permission failures are critical (2),
    /// everything else is a general error (1)
    pub fn from_engine(error: CivicReportError) -> Self {
        let exit_code = match &error {
            CivicReportError::Validation(_) | CivicReportError::PermissionDenied(_) => EXIT_ERROR,
            _ => EXIT_WARNING,
        };
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<CivicReportError> for CliError {
    fn from(error: CivicReportError) -> Self {
        Self::from_engine(error)
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_critical() {
        let err = CliError::from_engine(CivicReportError::Validation("empty".to_string()));
        assert_eq!(err.exit_code, EXIT_ERROR);
    }

    #[test]
    fn test_permission_errors_are_critical() {
        let err =
            CliError::from_engine(CivicReportError::PermissionDenied("citizen".to_string()));
        assert_eq!(err.exit_code, EXIT_ERROR);
    }

    #[test]
    fn test_io_errors_are_general() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = CliError::from_engine(CivicReportError::Io(io));
        assert_eq!(err.exit_code, EXIT_WARNING);
    }
}
