use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::resource::{contained_are_flat, contained_meta_is_local};
use crate::r5::{
    Boolean, Code, CodeableConcept, CodeableReference, DataType, DateTime, Extension, Id, Identifier, Markdown,
    Meta, Narrative, Quantity, Ratio, Resource, SubstanceStatus, Uri,
};

/// FHIR Substance resource
///
/// A homogeneous material with a definite composition.
///
/// ## Constraints
/// - dom-2: If the resource is contained in another resource, it SHALL NOT contain nested Resources
/// - dom-4: If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated
///
/// See: [Substance](http://hl7.org/fhir/StructureDefinition/Substance)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Substance", kind = "resource")]
#[fhir_invariant(
    key = "dom-2",
    severity = "error",
    human = "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
    expr = "contained.contained.empty()",
    path = "Substance",
    rule = "contained_flat"
)]
#[fhir_invariant(
    key = "dom-4",
    severity = "error",
    human = "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
    expr = "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
    path = "Substance",
    rule = "contained_meta_local"
)]
pub struct Substance {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Unique identifier
    identifier: Vec<Identifier>,
    /// Is this an instance of a substance or a kind of one
    #[fhir_element(required)]
    instance: Boolean,
    /// active | inactive | entered-in-error
    status: Option<Element<SubstanceStatus, Extension>>,
    /// What class/type of substance this is
    category: Vec<CodeableConcept>,
    /// What substance this is
    #[fhir_element(required)]
    code: CodeableReference,
    /// Textual description of the substance, comments
    description: Option<Markdown>,
    /// When no longer valid to use
    expiry: Option<DateTime>,
    /// Amount of substance in the package
    quantity: Option<Quantity>,
    /// Composition information about the substance
    ingredient: Vec<SubstanceIngredient>,
    hash_cache: HashCode,
}

impl Substance {
    fn contained_flat(&self) -> bool {
        contained_are_flat(&self.contained)
    }

    fn contained_meta_local(&self) -> bool {
        contained_meta_is_local(&self.contained)
    }

    /// `instance` is required, so an extension-only value reads as `false`.
    pub fn is_instance(&self) -> bool {
        self.instance.value.unwrap_or(false)
    }
}

/// FHIR Substance.ingredient backbone element
///
/// A substance can be composed of other substances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "SubstanceIngredient", kind = "backbone")]
pub struct SubstanceIngredient {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Optional amount (concentration)
    quantity: Option<Ratio>,
    /// A component of the substance
    #[fhir_element(required, choice = "CodeableConcept|Reference", reference = "Substance")]
    substance: DataType,
    hash_cache: HashCode,
}

#[cfg(test)]
mod tests {
    use atrius_model_support::ValidationError;

    use super::*;
    use crate::r5::Reference;

    fn lactose_code() -> CodeableReference {
        CodeableReference::builder()
            .concept(CodeableConcept::from_text("lactose").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn instance_and_code_are_required() {
        let err = Substance::builder().code(lactose_code()).build().unwrap_err();
        assert_eq!(err.element(), Some("instance"));
        let err = Substance::builder().instance(true).build().unwrap_err();
        assert_eq!(err.element(), Some("code"));

        let substance = Substance::builder().instance(true).code(lactose_code()).build().unwrap();
        assert!(substance.is_instance());
    }

    #[test]
    fn ingredient_substance_choice_and_target() {
        let by_reference = SubstanceIngredient::builder()
            .substance(Reference::to("Substance/glucose").unwrap())
            .build();
        assert!(by_reference.is_ok());

        let by_concept = SubstanceIngredient::builder()
            .substance(CodeableConcept::from_text("glucose").unwrap())
            .build();
        assert!(by_concept.is_ok());

        let wrong_target = SubstanceIngredient::builder()
            .substance(Reference::to("Medication/m1").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(wrong_target, ValidationError::InvalidReferenceType { element: "substance", .. }));

        let missing = SubstanceIngredient::builder().build().unwrap_err();
        assert!(matches!(missing, ValidationError::MissingRequired { element: "substance", .. }));
    }

    #[test]
    fn code_accepts_any_reference_target() {
        let code = CodeableReference::builder()
            .reference(Reference::to("SubstanceDefinition/glucose").unwrap())
            .build()
            .unwrap();
        assert!(Substance::builder().instance(false).code(code).build().is_ok());
        let code = CodeableReference::builder()
            .reference(Reference::to("Substance/other").unwrap())
            .build()
            .unwrap();
        assert!(Substance::builder().instance(false).code(code).build().is_ok());
    }
}
