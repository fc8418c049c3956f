//! Client-side checks run before a component or type is sent to the API.
//!
//! The API stays authoritative; these checks only catch what the entry forms
//! would: required fields for the chosen type, and positive integers for the
//! numeric specs.

use thiserror::Error;

use crate::entities::{ComponentType, NewComponentType};
use crate::enums::ComponentAttribute;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No component type was chosen.
    #[error("a component type is required")]
    MissingType,

    /// The chosen type requires fields that are empty.
    #[error("missing required fields: {}", .fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "))]
    MissingFields { fields: Vec<ComponentAttribute> },

    /// A numeric spec is zero or negative.
    #[error("{} must be a positive integer (got {value})", .field.label())]
    NotPositive {
        field: ComponentAttribute,
        value: i64,
    },

    /// The selected type does not match the component's `typeId`.
    #[error("component has type {component_type} but type {given} was supplied for validation")]
    TypeMismatch { component_type: i64, given: i64 },

    /// A component type must have a name.
    #[error("component type name is required")]
    BlankTypeName,

    /// A component type lists an attribute the client does not know.
    #[error("unknown component attribute '{0}'")]
    UnknownAttribute(String),
}

/// Read access to the fields validation cares about.
pub trait ComponentFields {
    fn type_id(&self) -> i64;
    fn has(&self, attribute: ComponentAttribute) -> bool;
    fn numeric_specs(&self) -> [(ComponentAttribute, Option<i64>); 3];
}

/// Validate a component against the type it claims.
///
/// # Errors
///
/// Returns the first failing rule: missing type, type mismatch, missing
/// required fields (all of them at once), then non-positive numeric specs.
pub fn validate_component(
    component: &impl ComponentFields,
    component_type: &ComponentType,
) -> Result<(), ValidationError> {
    if component.type_id() <= 0 {
        return Err(ValidationError::MissingType);
    }
    if component.type_id() != component_type.id {
        return Err(ValidationError::TypeMismatch {
            component_type: component.type_id(),
            given: component_type.id,
        });
    }

    let missing: Vec<ComponentAttribute> = component_type
        .required_attributes()
        .into_iter()
        .filter(|attribute| !component.has(*attribute))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    validate_numeric_specs(component)
}

/// Positive-integer check on `modelYear`, `processorCores` and `ram`.
///
/// # Errors
///
/// Returns [`ValidationError::NotPositive`] for the first offending field.
pub fn validate_numeric_specs(component: &impl ComponentFields) -> Result<(), ValidationError> {
    for (field, value) in component.numeric_specs() {
        if let Some(value) = value
            && value <= 0
        {
            return Err(ValidationError::NotPositive { field, value });
        }
    }
    Ok(())
}

/// Validate a component type body.
///
/// # Errors
///
/// Returns [`ValidationError::BlankTypeName`] or
/// [`ValidationError::UnknownAttribute`].
pub fn validate_component_type(body: &NewComponentType) -> Result<(), ValidationError> {
    if body.name.trim().is_empty() {
        return Err(ValidationError::BlankTypeName);
    }
    for name in &body.attributes {
        if name.parse::<ComponentAttribute>().is_err() {
            return Err(ValidationError::UnknownAttribute(name.clone()));
        }
    }
    Ok(())
}
