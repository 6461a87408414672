//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),

    #[error("bookmark stores differ in {0} place(s)")]
    Mismatch(usize),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        Self::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Mismatch(_) => crate::exitcode::DIFFERS,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::Format(_)) => crate::exitcode::DATAERR,
                    ApplicationError::ProfileNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormatError;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let format: CliError = ApplicationError::from(FormatError::Incompressible).into();
        assert_eq!(format.exit_code(), crate::exitcode::DATAERR);

        let missing: CliError = ApplicationError::ProfileNotFound(PathBuf::from("/nope")).into();
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        assert_eq!(CliError::Mismatch(2).exit_code(), crate::exitcode::DIFFERS);
        assert_eq!(CliError::Usage("x".into()).exit_code(), crate::exitcode::USAGE);
    }
}
