//! Error handling for the election core

/// Result type alias for the election core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the election core
///
/// Lookups that miss and rejected casts are not errors: they surface as
/// `None` and [`crate::voting::CastOutcome::Rejected`] respectively.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Voting state errors (shared storage faults)
    #[error("Voting error: {message}")]
    Voting { message: String },

    /// A voter or candidate name is already taken
    #[error("Duplicate {kind} registration: {name}")]
    DuplicateRegistration { kind: EntityKind, name: String },

    /// Validation errors
    #[error("Validation failed: {field}")]
    Validation { field: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Which registry rejected a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Voter,
    Candidate,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Voter => f.write_str("voter"),
            EntityKind::Candidate => f.write_str("candidate"),
        }
    }
}

impl Error {
    /// Create a new voting error
    pub fn voting(message: impl Into<String>) -> Self {
        Self::Voting {
            message: message.into(),
        }
    }

    /// Create a new duplicate registration error
    pub fn duplicate(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::DuplicateRegistration {
            kind,
            name: name.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! voting_error {
    ($msg:expr) => {
        $crate::Error::voting($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::voting(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::Error::configuration($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::configuration(format!($fmt, $($arg)*))
    };
}
