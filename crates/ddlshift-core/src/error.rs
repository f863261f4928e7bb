use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured engine error with a stable internal classification.
/// Module errors convert into this at the crate boundary.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a registry-origin invariant violation.
    pub(crate) fn registry_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Registry,
            message,
        )
    }

    /// Construct a catalog-origin invariant violation.
    pub(crate) fn catalog_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Catalog, message)
    }

    /// Construct a progress-origin input error.
    pub(crate) fn progress_input(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Progress, message)
    }

    /// True when the caller should retry in a later phase.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.class, ErrorClass::NotReady)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<ddlshift_config::ConfigError> for InternalError {
    fn from(err: ddlshift_config::ConfigError) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Registry or catalog out of sync with the data model; abort the job.
    InvariantViolation,
    /// Expected condition; retry once execution reaches a later phase.
    NotReady,
    /// Caller supplied an out-of-range argument.
    InvalidInput,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
            Self::NotReady => "not_ready",
            Self::InvalidInput => "invalid_input",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Registry,
    Selector,
    Catalog,
    Progress,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Registry => "registry",
            Self::Selector => "selector",
            Self::Catalog => "catalog",
            Self::Progress => "progress",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = InternalError::registry_invariant("element kind 'View' already registered");

        assert_eq!(
            err.display_with_class(),
            "registry:invariant_violation: element kind 'View' already registered"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn not_ready_is_retryable() {
        let err = InternalError::new(ErrorClass::NotReady, ErrorOrigin::Selector, "later");

        assert!(err.is_retryable());
    }

    #[test]
    fn config_errors_map_to_invalid_input() {
        let err: InternalError = ddlshift_config::ConfigError::Invalid("bad".to_string()).into();

        assert_eq!(err.class, ErrorClass::InvalidInput);
        assert_eq!(err.origin, ErrorOrigin::Config);
    }
}
