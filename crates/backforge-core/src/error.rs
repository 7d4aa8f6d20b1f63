//! Root error for the engine: either a rule on a value was broken (domain)
//! or a scaffold run failed (application).

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for backforge core operations.
#[derive(Debug, Error, Clone)]
pub enum BackforgeError {
    /// Errors from the domain layer (business rule violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl BackforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// How the CLI classifies a failure; it picks the exit code from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type BackforgeResult<T> = Result<T, BackforgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn categories_follow_source_layer() {
        let exists: BackforgeError = ApplicationError::Precondition {
            path: PathBuf::from("api"),
        }
        .into();
        assert_eq!(exists.category(), ErrorCategory::Validation);

        let missing: BackforgeError = ApplicationError::TemplateNotFound {
            selection: "Hono JavaScript".into(),
            reason: "no template registered".into(),
        }
        .into();
        assert_eq!(missing.category(), ErrorCategory::NotFound);

        let domain: BackforgeError = DomainError::UnknownOption {
            option: "framework",
            value: "koa".into(),
        }
        .into();
        assert_eq!(domain.category(), ErrorCategory::Validation);
        assert_eq!(domain.to_string(), "Unknown framework: 'koa'");
    }
}
