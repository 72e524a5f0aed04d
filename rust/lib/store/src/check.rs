//! Field checks shared by `clean` implementations.
//!
//! Each check returns the first failure as a `ValidationError` so hooks can
//! chain them with `?`. `entity` is the collection name.

use cattlecare_core::ValidationError;

use crate::Ref;

/// A required string: empty counts as absent.
pub fn required_str(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingRequiredField { entity, field });
    }
    Ok(())
}

pub fn max_len(
    entity: &'static str,
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { entity, field, max });
    }
    Ok(())
}

/// A required value of any type.
pub fn required<'a, V>(
    entity: &'static str,
    field: &'static str,
    value: &'a Option<V>,
) -> Result<&'a V, ValidationError> {
    value
        .as_ref()
        .ok_or(ValidationError::MissingRequiredField { entity, field })
}

/// A required sequence: must hold at least one element.
pub fn non_empty<V>(
    entity: &'static str,
    field: &'static str,
    values: &[V],
) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::MissingRequiredField { entity, field });
    }
    Ok(())
}

/// A required reference to another document. An empty id counts as unset.
/// Existence of the target is not checked.
pub fn required_ref<'a, T>(
    entity: &'static str,
    field: &'static str,
    value: &'a Option<Ref<T>>,
) -> Result<&'a Ref<T>, ValidationError> {
    value
        .as_ref()
        .filter(|r| !r.id().is_empty())
        .ok_or(ValidationError::ReferenceUnset { entity, field })
}

/// A required quantity that must be strictly positive and finite.
pub fn positive(
    entity: &'static str,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingRequiredField { entity, field })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidNumericRange { entity, field, value });
    }
    Ok(value)
}
