use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these,
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

// ── ValidationError ─────────────────────────────────────────────────

/// Why a record was rejected by its pre-save `clean` hook.
///
/// `entity` is the collection name (`"cows"`, `"milking_events"`, ...),
/// `field` the document field that failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{entity}: field '{field}' is required")]
    MissingRequiredField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("'{value}' is not a valid {kind}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("{entity}: field '{field}' must be a positive value, got {value}")]
    InvalidNumericRange {
        entity: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("{entity}: reference '{field}' is not set")]
    ReferenceUnset {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity}: field '{field}' exceeds {max} characters")]
    TooLong {
        entity: &'static str,
        field: &'static str,
        max: usize,
    },
}

impl ValidationError {
    /// The offending field, or the enum kind for `InvalidEnumValue`.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { field, .. }
            | ValidationError::InvalidNumericRange { field, .. }
            | ValidationError::ReferenceUnset { field, .. }
            | ValidationError::TooLong { field, .. } => field,
            ValidationError::InvalidEnumValue { kind, .. } => kind,
        }
    }
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified error type returned by every store operation.
///
/// Each variant maps to a stable error code (see [`error_code`]).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Document id already taken.
    #[error("{0}")]
    Conflict(String),

    /// The record failed its `clean` hook. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Bad connection string or config file.
    #[error("{0}")]
    Config(String),

    /// Storage backend failure.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error (e.g. a stored document fails to decode).
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Config(_) => error_code::CONFIG_ERROR,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ServiceError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_mapping() {
        assert_eq!(ServiceError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(ServiceError::Conflict("x".into()).error_code(), "ALREADY_EXISTS");
        assert_eq!(ServiceError::Config("x".into()).error_code(), "CONFIG_ERROR");
        assert_eq!(ServiceError::Storage("x".into()).error_code(), "STORAGE_ERROR");
        assert_eq!(ServiceError::Internal("x".into()).error_code(), "INTERNAL");
        let v = ValidationError::ReferenceUnset { entity: "farms", field: "owner" };
        assert_eq!(ServiceError::from(v).error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn validation_messages() {
        let e = ValidationError::MissingRequiredField { entity: "cows", field: "name" };
        assert_eq!(e.to_string(), "cows: field 'name' is required");

        let e = ValidationError::InvalidEnumValue { kind: "role", value: "pilot".into() };
        assert_eq!(e.to_string(), "'pilot' is not a valid role");
        assert_eq!(e.field(), "role");

        let e = ValidationError::InvalidNumericRange {
            entity: "feeds",
            field: "feed_amount",
            value: -1.0,
        };
        assert_eq!(e.to_string(), "feeds: field 'feed_amount' must be a positive value, got -1");
    }

    #[test]
    fn service_error_display_is_transparent_for_validation() {
        let err: ServiceError =
            ValidationError::ReferenceUnset { entity: "breeding", field: "breeding_partner" }.into();
        assert_eq!(err.to_string(), "breeding: reference 'breeding_partner' is not set");
        assert!(err.as_validation().is_some());
        assert!(ServiceError::NotFound("x".into()).as_validation().is_none());
    }
}
