use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::resource::{contained_are_flat, contained_meta_is_local};
use crate::r5::{
    Boolean, Code, CodeableConcept, CodeableReference, DataType, DateTime, Extension, Id, Identifier,
    MedicationStatus, Meta, Narrative, Quantity, Reference, Resource, String, Uri,
};

/// FHIR Medication resource
///
/// This resource is primarily used for the identification and definition of a
/// medication, including ingredients, for the purposes of prescribing,
/// dispensing, and administering a medication as well as for making
/// statements about medication use.
///
/// ## Constraints
/// - dom-2: If the resource is contained in another resource, it SHALL NOT contain nested Resources
/// - dom-3: If the resource is contained in another resource, it SHALL be referred to from elsewhere in the resource or SHALL refer to the containing resource
/// - dom-4: If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated
/// - dom-6: A resource should have narrative for robust management
///
/// See: [Medication](http://hl7.org/fhir/StructureDefinition/Medication)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Medication", kind = "resource")]
#[fhir_invariant(
    key = "dom-2",
    severity = "error",
    human = "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
    expr = "contained.contained.empty()",
    path = "Medication",
    rule = "contained_flat"
)]
#[fhir_invariant(
    key = "dom-3",
    severity = "error",
    human = "If the resource is contained in another resource, it SHALL be referred to from elsewhere in the resource or SHALL refer to the containing resource",
    expr = "contained.where((('#'+id in (%resource.descendants().reference | %resource.descendants().ofType(canonical) | %resource.descendants().ofType(uri) | %resource.descendants().ofType(url))) or descendants().where(reference = '#').exists() or descendants().where(ofType(canonical) = '#').exists() or descendants().where(ofType(canonical) = '#').exists()).not()).trace('unmatched', id).empty()",
    path = "Medication"
)]
#[fhir_invariant(
    key = "dom-4",
    severity = "error",
    human = "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
    expr = "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
    path = "Medication",
    rule = "contained_meta_local"
)]
#[fhir_invariant(
    key = "dom-6",
    severity = "warning",
    human = "A resource should have narrative for robust management",
    expr = "text.`div`.exists()",
    path = "Medication"
)]
pub struct Medication {
    /// Logical id of this artifact
    id: Option<Id>,
    /// Metadata about the resource
    meta: Option<Meta>,
    /// A set of rules under which this content was created
    implicit_rules: Option<Uri>,
    /// Language of the resource content
    language: Option<Code>,
    /// Text summary of the resource, for human interpretation
    text: Option<Narrative>,
    /// Contained, inline Resources
    contained: Vec<Resource>,
    /// Additional content defined by implementations
    extension: Vec<Extension>,
    /// Extensions that cannot be ignored
    modifier_extension: Vec<Extension>,
    /// Business identifier for this medication
    identifier: Vec<Identifier>,
    /// Codes that identify this medication
    code: Option<CodeableConcept>,
    /// active | inactive | entered-in-error
    status: Option<Element<MedicationStatus, Extension>>,
    /// Organization that has authorization to market medication
    #[fhir_element(reference = "Organization")]
    marketing_authorization_holder: Option<Reference>,
    /// powder | tablets | capsule +
    dose_form: Option<CodeableConcept>,
    /// When the specified product code does not infer a package size, this is the specific amount of drug in the product
    total_volume: Option<Quantity>,
    /// Active or inactive ingredient
    ingredient: Vec<MedicationIngredient>,
    /// Details about packaged medications
    batch: Option<MedicationBatch>,
    /// Knowledge about this medication
    #[fhir_element(reference = "MedicationKnowledge")]
    definition: Option<Reference>,
    hash_cache: HashCode,
}

impl Medication {
    fn contained_flat(&self) -> bool {
        contained_are_flat(&self.contained)
    }

    fn contained_meta_local(&self) -> bool {
        contained_meta_is_local(&self.contained)
    }

    /// Ingredients flagged `isActive = true`.
    pub fn active_ingredients(&self) -> impl Iterator<Item = &MedicationIngredient> {
        self.ingredient
            .iter()
            .filter(|ingredient| ingredient.is_active.as_ref().and_then(|flag| flag.value) == Some(true))
    }
}

/// FHIR Medication.ingredient backbone element
///
/// Identifies a particular constituent of interest in the product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationIngredient", kind = "backbone")]
pub struct MedicationIngredient {
    /// Unique id for inter-element referencing
    id: Option<std::string::String>,
    /// Additional content defined by implementations
    extension: Vec<Extension>,
    /// Extensions that cannot be ignored even if unrecognized
    modifier_extension: Vec<Extension>,
    /// The ingredient (substance or medication) that the ingredient.strength relates to
    #[fhir_element(required)]
    item: CodeableReference,
    /// Active ingredient indicator
    is_active: Option<Boolean>,
    /// Quantity of ingredient present
    #[fhir_element(choice = "Ratio|CodeableConcept|Quantity")]
    strength: Option<DataType>,
    hash_cache: HashCode,
}

/// FHIR Medication.batch backbone element
///
/// Information that only applies to packages (not products).
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationBatch", kind = "backbone")]
pub struct MedicationBatch {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Identifier assigned to batch
    lot_number: Option<String>,
    /// When batch will expire
    expiration_date: Option<DateTime>,
    hash_cache: HashCode,
}

#[cfg(test)]
mod tests {
    use atrius_model_support::{FhirModel, ValidationError};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::r5::{Ratio, Substance};

    fn lactose() -> CodeableReference {
        CodeableReference::builder()
            .reference(Reference::to("Substance/lactose").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn ingredient_item_is_required() {
        let err = MedicationIngredient::builder().is_active(true).build().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingRequired { type_name: "MedicationIngredient", element: "item" }
        ));
    }

    #[test]
    fn strength_accepts_declared_types_only() {
        let ratio = Ratio::builder()
            .numerator(Quantity::ucum(dec!(250), "mg").unwrap())
            .denominator(Quantity::ucum(dec!(1), "{tablet}").unwrap())
            .build()
            .unwrap();
        assert!(MedicationIngredient::builder().item(lactose()).strength(ratio).build().is_ok());

        let err = MedicationIngredient::builder()
            .item(lactose())
            .strength(DataType::String("strong".into()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidChoiceType { element: "strength", .. }));
    }

    #[test]
    fn ingredient_item_target_is_not_restricted() {
        let item = CodeableReference::builder()
            .reference(Reference::to("Patient/p1").unwrap())
            .build()
            .unwrap();
        assert!(MedicationIngredient::builder().item(item).build().is_ok());
    }

    #[test]
    fn holder_must_be_an_organization() {
        assert!(
            Medication::builder()
                .marketing_authorization_holder(Reference::to("Organization/acme").unwrap())
                .build()
                .is_ok()
        );
        assert!(
            Medication::builder()
                .marketing_authorization_holder(Reference::to("Practitioner/p1").unwrap())
                .build()
                .is_err()
        );
    }

    #[test]
    fn contained_resources_cannot_nest() {
        let substance = Substance::builder()
            .id("lactose")
            .instance(false)
            .code(CodeableReference::builder().concept(CodeableConcept::from_text("lactose").unwrap()).build().unwrap())
            .build()
            .unwrap();
        let inner = Medication::builder().id("inner").contained(substance).build().unwrap();
        let err = Medication::builder().contained(inner).build().unwrap_err();
        assert!(matches!(err, ValidationError::ConstraintViolated { key: "dom-2", .. }));
    }

    #[test]
    fn active_ingredient_filter() {
        let medication = Medication::builder()
            .ingredient(MedicationIngredient::builder().item(lactose()).is_active(false).build().unwrap())
            .ingredient(MedicationIngredient::builder().item(lactose()).is_active(true).build().unwrap())
            .build()
            .unwrap();
        assert_eq!(medication.active_ingredients().count(), 1);
        assert_eq!(Medication::invariants().len(), 4);
    }
}
