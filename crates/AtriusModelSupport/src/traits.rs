use crate::validate::{Invariant, ValidationError};
use crate::visitor::Visitable;

/// Where a generated type sits in the FHIR type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Resource,
    ComplexType,
    BackboneElement,
}

/// Contract implemented by every generated resource, backbone element and
/// complex data type.
pub trait FhirModel: Visitable + Clone + PartialEq + Sized {
    type Builder: ModelBuilder<Target = Self>;

    /// FHIR name of the type (`"Medication"`, `"MedicationIngredient"`, `"Ratio"`).
    const FHIR_TYPE: &'static str;
    const KIND: ModelKind;

    fn invariants() -> &'static [Invariant];

    /// A builder pre-populated with every field of this instance.
    fn to_builder(&self) -> Self::Builder;

    /// Runs the same checks `build()` performs on a validating builder.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Structural hash, computed on first use and cached on the instance.
    fn hash_code(&self) -> u64;
}

pub trait ModelBuilder: Sized {
    type Target;

    /// Turns validation on `build()` on or off. Required fields are always
    /// enforced since the built type cannot represent their absence.
    fn validating(self, validating: bool) -> Self;

    fn build(self) -> Result<Self::Target, ValidationError>;
}

/// Values stored in choice (`[x]`) fields report the runtime type they hold.
pub trait ChoiceType {
    fn choice_type_name(&self) -> &'static str;
}

/// Values that may carry a resource reference.
///
/// Returns `None` when the value holds no reference at all (for example a
/// `CodeableReference` carrying only a concept), otherwise the explicit
/// `Reference.type` and the literal `Reference.reference`.
pub trait ReferenceTarget {
    fn reference_parts(&self) -> Option<(Option<&str>, Option<&str>)>;
}

impl<T: ReferenceTarget + ?Sized> ReferenceTarget for Box<T> {
    fn reference_parts(&self) -> Option<(Option<&str>, Option<&str>)> {
        (**self).reference_parts()
    }
}

impl<T: ChoiceType + ?Sized> ChoiceType for Box<T> {
    fn choice_type_name(&self) -> &'static str {
        (**self).choice_type_name()
    }
}

/// Per-field checks a value contributes to its owner's validation.
///
/// `declared_type` is the type name the field was declared with (`"Id"`,
/// `"Code"`, `"PositiveInt"`, ...), which lets primitives sharing a Rust
/// representation apply their own lexical rules. Complex values are validated
/// when they are built, so the default is a no-op.
pub trait ValidateField {
    fn validate_field(
        &self,
        _owner: &'static str,
        _element: &'static str,
        _declared_type: &'static str,
    ) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<T: ValidateField + ?Sized> ValidateField for Box<T> {
    fn validate_field(
        &self,
        owner: &'static str,
        element: &'static str,
        declared_type: &'static str,
    ) -> Result<(), ValidationError> {
        (**self).validate_field(owner, element, declared_type)
    }
}

impl ValidateField for String {}
