//! Error types for the FitTrack calculation core

use thiserror::Error;

/// Errors raised by the pure calculation and tracking core.
///
/// Every error is local to a single operation on a single owner's data;
/// nothing here implies a rollback of other entities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A physical measurement fed to a calculator is unusable
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// A stored entity points at reference data that does not exist
    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    /// The requested transition would break a state invariant
    #[error("State invariant violated: {0}")]
    StateInvariant(String),

    /// The entity being mutated no longer exists
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input rejected at the boundary
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Field name attached to the error, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            CoreError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field() {
        let err = CoreError::invalid_input("weight_kg", "must be positive");
        assert_eq!(err.to_string(), "Invalid weight_kg: must be positive");
        assert_eq!(err.field(), Some("weight_kg"));
    }

    #[test]
    fn test_other_variants_have_no_field() {
        assert_eq!(CoreError::NotFound("set".into()).field(), None);
        assert_eq!(CoreError::StateInvariant("busy".into()).field(), None);
    }
}
