use thiserror::Error;

use crate::resource_types::is_resource_type;
use crate::traits::{ChoiceType, ReferenceTarget};
use crate::visitor::Visitable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A FHIR constraint declared on a type (for example `att-1` on `Attachment`).
#[derive(Debug, Clone)]
pub struct Invariant {
    pub key: &'static str,
    pub severity: ValidationSeverity,
    pub human: &'static str,
    pub expr: &'static str,
    pub path: &'static str,
}

/// The first constraint violated while building a model instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{type_name}.{element}: required element is missing")]
    MissingRequired { type_name: &'static str, element: &'static str },

    #[error("{type_name}.{element}: required list must contain at least {min} element(s)")]
    EmptyList { type_name: &'static str, element: &'static str, min: usize },

    #[error("{type_name}.{element}: type '{actual}' is not one of the allowed choices [{allowed}]")]
    InvalidChoiceType {
        type_name: &'static str,
        element: &'static str,
        actual: &'static str,
        allowed: String,
    },

    #[error("{type_name}.{element}: reference target '{actual}' is not one of [{allowed}]")]
    InvalidReferenceType {
        type_name: &'static str,
        element: &'static str,
        actual: String,
        allowed: String,
    },

    #[error("{type_name}.{element}: {reason}")]
    InvalidReference { type_name: &'static str, element: &'static str, reason: String },

    #[error("{type_name}: element must have a value or children (ele-1)")]
    ValueOrChildren { type_name: &'static str },

    #[error("{type_name}.{element}: primitive must have a value or extensions (ele-1)")]
    EmptyPrimitive { type_name: &'static str, element: &'static str },

    #[error("{type_name}.{element}: invalid {primitive} value '{value}'")]
    InvalidPrimitive {
        type_name: &'static str,
        element: &'static str,
        primitive: &'static str,
        value: String,
    },

    #[error("{type_name}: constraint {key} violated: {human}")]
    ConstraintViolated { type_name: &'static str, key: &'static str, human: &'static str },
}

impl ValidationError {
    /// The owning FHIR type the error was raised for.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValidationError::MissingRequired { type_name, .. }
            | ValidationError::EmptyList { type_name, .. }
            | ValidationError::InvalidChoiceType { type_name, .. }
            | ValidationError::InvalidReferenceType { type_name, .. }
            | ValidationError::InvalidReference { type_name, .. }
            | ValidationError::ValueOrChildren { type_name }
            | ValidationError::EmptyPrimitive { type_name, .. }
            | ValidationError::InvalidPrimitive { type_name, .. }
            | ValidationError::ConstraintViolated { type_name, .. } => type_name,
        }
    }

    /// The offending element, when the error is tied to a single field.
    pub fn element(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingRequired { element, .. }
            | ValidationError::EmptyList { element, .. }
            | ValidationError::InvalidChoiceType { element, .. }
            | ValidationError::InvalidReferenceType { element, .. }
            | ValidationError::InvalidReference { element, .. }
            | ValidationError::EmptyPrimitive { element, .. }
            | ValidationError::InvalidPrimitive { element, .. } => Some(element),
            ValidationError::ValueOrChildren { .. } | ValidationError::ConstraintViolated { .. } => None,
        }
    }
}

pub fn require_non_empty<T>(
    values: &[T],
    type_name: &'static str,
    element: &'static str,
    min: usize,
) -> Result<(), ValidationError> {
    if values.len() < min {
        return Err(ValidationError::EmptyList { type_name, element, min });
    }
    Ok(())
}

pub fn choice_element<T: ChoiceType + ?Sized>(
    value: &T,
    type_name: &'static str,
    element: &'static str,
    allowed: &[&'static str],
) -> Result<(), ValidationError> {
    let actual = value.choice_type_name();
    if allowed.contains(&actual) {
        return Ok(());
    }
    Err(ValidationError::InvalidChoiceType {
        type_name,
        element,
        actual,
        allowed: allowed.join(", "),
    })
}

/// Checks that a reference only points at the allowed resource types.
///
/// Both the explicit `Reference.type` and the type segment of a literal
/// reference (`Patient/123`, `https://host/fhir/Patient/123/_history/2`,
/// `Patient?identifier=x`) are checked. Contained (`#id`) and `urn:` references
/// carry no type information and are accepted. The target `Resource` allows any
/// resource type.
pub fn check_reference_type<T: ReferenceTarget + ?Sized>(
    value: &T,
    type_name: &'static str,
    element: &'static str,
    allowed: &[&'static str],
) -> Result<(), ValidationError> {
    let Some((explicit_type, reference)) = value.reference_parts() else {
        return Ok(());
    };
    let any_resource = allowed.contains(&"Resource");

    if let Some(explicit) = explicit_type {
        if !is_resource_type(explicit) {
            return Err(ValidationError::InvalidReference {
                type_name,
                element,
                reason: format!("resource type found in Reference.type '{explicit}' is not a valid resource type"),
            });
        }
        if !any_resource && !allowed.contains(&explicit) {
            return Err(ValidationError::InvalidReferenceType {
                type_name,
                element,
                actual: explicit.to_string(),
                allowed: allowed.join(", "),
            });
        }
    }

    let Some(reference) = reference else {
        return Ok(());
    };
    let Some(literal_type) = literal_reference_type(reference) else {
        tracing::trace!(reference, "reference carries no resource type, skipping target check");
        return Ok(());
    };

    if let Some(explicit) = explicit_type {
        if explicit != literal_type {
            return Err(ValidationError::InvalidReference {
                type_name,
                element,
                reason: format!(
                    "resource type found in reference value '{reference}' does not match Reference.type '{explicit}'"
                ),
            });
        }
    }
    if !any_resource && !allowed.contains(&literal_type) {
        return Err(ValidationError::InvalidReferenceType {
            type_name,
            element,
            actual: literal_type.to_string(),
            allowed: allowed.join(", "),
        });
    }
    Ok(())
}

/// Extracts the resource type from a literal or conditional reference.
pub fn literal_reference_type(reference: &str) -> Option<&str> {
    if reference.starts_with('#') || reference.starts_with("urn:") {
        return None;
    }
    // Conditional reference: Type?search
    if let Some((head, _query)) = reference.split_once('?') {
        return (!head.contains('/') && is_resource_type(head)).then_some(head);
    }
    let segments: Vec<&str> = reference.split('/').filter(|s| !s.is_empty()).collect();
    // [..., Type, id] or [..., Type, id, "_history", vid]
    let type_index = match segments.len() {
        n if n >= 4 && segments[n - 2] == "_history" => n - 4,
        n if n >= 2 => n - 2,
        _ => return None,
    };
    let candidate = segments[type_index];
    is_resource_type(candidate).then_some(candidate)
}

/// ele-1: every element carries a value or at least one child.
pub fn require_value_or_children(node: &dyn Visitable) -> Result<(), ValidationError> {
    if node.has_value() || node.has_children() {
        return Ok(());
    }
    Err(ValidationError::ValueOrChildren { type_name: node.type_name() })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ref(Option<&'static str>, Option<&'static str>);

    impl ReferenceTarget for Ref {
        fn reference_parts(&self) -> Option<(Option<&str>, Option<&str>)> {
            Some((self.0, self.1))
        }
    }

    struct Choice(&'static str);

    impl ChoiceType for Choice {
        fn choice_type_name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn literal_reference_types() {
        assert_eq!(literal_reference_type("Organization/1"), Some("Organization"));
        assert_eq!(literal_reference_type("http://example.org/fhir/Organization/1"), Some("Organization"));
        assert_eq!(literal_reference_type("Organization/1/_history/3"), Some("Organization"));
        assert_eq!(literal_reference_type("Organization?identifier=abc"), Some("Organization"));
        assert_eq!(literal_reference_type("#contained"), None);
        assert_eq!(literal_reference_type("urn:uuid:2f8bbb7e-4f3a-4b7c-9d52-8d7a0c0f1a11"), None);
        assert_eq!(literal_reference_type("NotAType/1"), None);
    }

    #[test]
    fn allowed_reference_passes() {
        let r = Ref(None, Some("Organization/1"));
        assert!(check_reference_type(&r, "Medication", "marketingAuthorizationHolder", &["Organization"]).is_ok());
    }

    #[test]
    fn disallowed_reference_fails() {
        let r = Ref(None, Some("Patient/1"));
        let err = check_reference_type(&r, "Medication", "marketingAuthorizationHolder", &["Organization"])
            .unwrap_err();
        assert_eq!(err.element(), Some("marketingAuthorizationHolder"));
        assert!(matches!(err, ValidationError::InvalidReferenceType { ref actual, .. } if actual == "Patient"));
    }

    #[test]
    fn explicit_type_must_agree_with_literal() {
        let r = Ref(Some("Organization"), Some("Patient/1"));
        assert!(matches!(
            check_reference_type(&r, "Medication", "x", &["Organization", "Patient"]),
            Err(ValidationError::InvalidReference { .. })
        ));
    }

    #[test]
    fn unknown_explicit_type_fails() {
        let r = Ref(Some("Nonsense"), None);
        assert!(check_reference_type(&r, "Medication", "x", &["Resource"]).is_err());
    }

    #[test]
    fn resource_target_allows_anything() {
        let r = Ref(Some("Patient"), Some("Patient/1"));
        assert!(check_reference_type(&r, "Parameters", "x", &["Resource"]).is_ok());
    }

    #[test]
    fn choice_type_checks() {
        assert!(choice_element(&Choice("Ratio"), "MedicationIngredient", "strength", &["Ratio", "Quantity"]).is_ok());
        let err = choice_element(&Choice("String"), "MedicationIngredient", "strength", &["Ratio", "Quantity"])
            .unwrap_err();
        assert_eq!(err.to_string(), "MedicationIngredient.strength: type 'String' is not one of the allowed choices [Ratio, Quantity]");
    }

    #[test]
    fn list_minimum() {
        assert!(require_non_empty::<u8>(&[], "Substance", "ingredient", 1).is_err());
        assert!(require_non_empty(&[1], "Substance", "ingredient", 1).is_ok());
        assert!(require_non_empty::<u8>(&[], "Substance", "ingredient", 0).is_ok());
    }
}
