use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Finding zero chains is still a success; only failures to obtain or
/// persist the graph change the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis completed (with or without culprit chains)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors, bad package ids)
    InvalidArguments = 2,
    /// The graph provider failed or timed out for a package
    ProviderError = 3,
    /// Snapshot read/write failure
    StorageError = 4,
    /// Any other application error, including graph consistency faults
    ApplicationError = 5,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an application error onto the exit code reported to the shell
    pub fn from_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<CulpritError>() {
            Some(CulpritError::Provider { .. }) => ExitCode::ProviderError,
            Some(CulpritError::Storage { .. }) => ExitCode::StorageError,
            Some(CulpritError::InvalidPackageId { .. }) | Some(CulpritError::Validation { .. }) => {
                ExitCode::InvalidArguments
            }
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ProviderError => write!(f, "Provider Error (3)"),
            ExitCode::StorageError => write!(f, "Storage Error (4)"),
            ExitCode::ApplicationError => write!(f, "Application Error (5)"),
        }
    }
}

/// Typed failures of the culprit analysis.
#[derive(Debug, Error)]
pub enum CulpritError {
    #[error("Failed to describe package: {package}\nDetails: {details}\n\n💡 Hint: Verify the package resolves with `go list -json {package}` from the working directory")]
    Provider { package: String, details: String },

    #[error("Snapshot storage failure: {path}\nDetails: {details}\n\n💡 Hint: If the snapshot cannot be read, re-run with --rebuild to regenerate it; if it cannot be written, check the directory permissions or choose another --snapshot path")]
    Storage { path: PathBuf, details: String },

    /// The graph has no record for a package that an import list refers to
    #[error("Package not found in dependency graph: {package}\n\n💡 Hint: The snapshot is incomplete for this package; re-run with --rebuild")]
    NotFound { package: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },

    #[error("Invalid package identifier: {value:?}\nReason: {reason}")]
    InvalidPackageId { value: String, reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CulpritError {
    pub fn provider(package: impl Into<String>, details: impl fmt::Display) -> Self {
        CulpritError::Provider {
            package: package.into(),
            details: details.to_string(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, details: impl fmt::Display) -> Self {
        CulpritError::Storage {
            path: path.into(),
            details: details.to_string(),
        }
    }
}
