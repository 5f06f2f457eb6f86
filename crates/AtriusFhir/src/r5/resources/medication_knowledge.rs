use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::date_time::PrecisionDateTime;
use crate::element::Element;
use crate::r5::resource::{contained_are_flat, contained_meta_is_local};
use crate::r5::{
    Code, CodeableConcept, DataType, Extension, Id, Identifier, Markdown, MedicationKnowledgeStatus, Meta, Narrative,
    Period, Reference, Resource, String, Uri,
};

/// FHIR MedicationKnowledge resource
///
/// Information about a medication that is used to support knowledge.
///
/// Carries the identifying, descriptive, cost and monitoring parts of the
/// resource; regulatory, packaging and kinetics sections are not modelled.
///
/// ## Constraints
/// - dom-2: If the resource is contained in another resource, it SHALL NOT contain nested Resources
/// - dom-4: If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated
///
/// See: [MedicationKnowledge](http://hl7.org/fhir/StructureDefinition/MedicationKnowledge)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationKnowledge", kind = "resource")]
#[fhir_invariant(
    key = "dom-2",
    severity = "error",
    human = "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
    expr = "contained.contained.empty()",
    path = "MedicationKnowledge",
    rule = "contained_flat"
)]
#[fhir_invariant(
    key = "dom-4",
    severity = "error",
    human = "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
    expr = "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
    path = "MedicationKnowledge",
    rule = "contained_meta_local"
)]
pub struct MedicationKnowledge {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Business identifier for this medication
    identifier: Vec<Identifier>,
    /// Code that identifies this medication
    code: Option<CodeableConcept>,
    /// active | entered-in-error | inactive
    status: Option<Element<MedicationKnowledgeStatus, Extension>>,
    /// Creator or owner of the knowledge or information about the medication
    #[fhir_element(reference = "Organization")]
    author: Option<Reference>,
    /// Codes that identify the different jurisdictions for which the information of this resource was created
    intended_jurisdiction: Vec<CodeableConcept>,
    /// A name associated with the medication being described
    name: Vec<String>,
    /// Associated or related medication information
    related_medication_knowledge: Vec<MedicationKnowledgeRelatedMedicationKnowledge>,
    /// The set of medication resources that are associated with this medication
    #[fhir_element(reference = "Medication")]
    associated_medication: Vec<Reference>,
    /// Category of the medication or product
    product_type: Vec<CodeableConcept>,
    /// Associated documentation about the medication
    monograph: Vec<MedicationKnowledgeMonograph>,
    /// The instructions for preparing the medication
    preparation_instruction: Option<Markdown>,
    /// The pricing of the medication
    cost: Vec<MedicationKnowledgeCost>,
    /// Program under which a medication is reviewed
    monitoring_program: Vec<MedicationKnowledgeMonitoringProgram>,
    /// Potential clinical issue with or between medication(s)
    #[fhir_element(reference = "ClinicalUseDefinition")]
    clinical_use_issue: Vec<Reference>,
    hash_cache: HashCode,
}

impl MedicationKnowledge {
    fn contained_flat(&self) -> bool {
        contained_are_flat(&self.contained)
    }

    fn contained_meta_local(&self) -> bool {
        contained_meta_is_local(&self.contained)
    }

    /// Costs in effect at `at`, plus costs without an effective period.
    pub fn costs_effective_at(&self, at: &PrecisionDateTime) -> Vec<&MedicationKnowledgeCost> {
        self.cost
            .iter()
            .filter(|cost| cost.effective_date.is_empty() || cost.effective_date.iter().any(|p| p.contains(at)))
            .collect()
    }
}

/// FHIR MedicationKnowledge.relatedMedicationKnowledge backbone element
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationKnowledgeRelatedMedicationKnowledge", kind = "backbone")]
pub struct MedicationKnowledgeRelatedMedicationKnowledge {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Category of medicationKnowledge
    #[fhir_element(required)]
    r#type: CodeableConcept,
    /// Associated documentation about the associated medication knowledge
    #[fhir_element(required, reference = "MedicationKnowledge")]
    reference: Vec<Reference>,
    hash_cache: HashCode,
}

/// FHIR MedicationKnowledge.monograph backbone element
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationKnowledgeMonograph", kind = "backbone")]
pub struct MedicationKnowledgeMonograph {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// The category of medication document
    r#type: Option<CodeableConcept>,
    /// Associated documentation about the medication
    #[fhir_element(reference = "DocumentReference")]
    source: Option<Reference>,
    hash_cache: HashCode,
}

/// FHIR MedicationKnowledge.cost backbone element
///
/// The price of the medication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationKnowledgeCost", kind = "backbone")]
pub struct MedicationKnowledgeCost {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// The date range for which the cost is effective
    effective_date: Vec<Period>,
    /// The category of the cost information
    #[fhir_element(required)]
    r#type: CodeableConcept,
    /// The source or owner for the price information
    source: Option<String>,
    /// The price or category of the cost of the medication
    #[fhir_element(required, choice = "Money|CodeableConcept")]
    cost: DataType,
    hash_cache: HashCode,
}

/// FHIR MedicationKnowledge.monitoringProgram backbone element
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "MedicationKnowledgeMonitoringProgram", kind = "backbone")]
pub struct MedicationKnowledgeMonitoringProgram {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Type of program under which the medication is monitored
    r#type: Option<CodeableConcept>,
    /// Name of the reviewing program
    name: Option<String>,
    hash_cache: HashCode,
}

#[cfg(test)]
mod tests {
    use atrius_model_support::{ChoiceType, ValidationError};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::r5::{Money, Quantity};

    fn cost(amount: rust_decimal::Decimal) -> MedicationKnowledgeCost {
        MedicationKnowledgeCost::builder()
            .r#type(CodeableConcept::from_text("wholesale").unwrap())
            .cost(Money::builder().value(amount).currency("EUR").build().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn cost_is_money_or_concept() {
        assert_eq!(cost(dec!(12.40)).cost().choice_type_name(), "Money");

        let err = MedicationKnowledgeCost::builder()
            .r#type(CodeableConcept::from_text("wholesale").unwrap())
            .cost(Quantity::ucum(dec!(1), "mg").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidChoiceType { actual: "Quantity", .. }));
    }

    #[test]
    fn related_knowledge_needs_a_reference() {
        let err = MedicationKnowledgeRelatedMedicationKnowledge::builder()
            .r#type(CodeableConcept::from_text("brand").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyList { element: "reference", min: 1, .. }));

        let related = MedicationKnowledgeRelatedMedicationKnowledge::builder()
            .r#type(CodeableConcept::from_text("brand").unwrap())
            .reference(Reference::to("MedicationKnowledge/generic").unwrap())
            .build()
            .unwrap();
        assert_eq!(related.reference().len(), 1);
    }

    #[test]
    fn names_and_effective_costs() {
        let dated = cost(dec!(9.99))
            .to_builder()
            .effective_date(
                Period::builder()
                    .start(PrecisionDateTime::parse("2024-01-01").unwrap())
                    .end(PrecisionDateTime::parse("2024-12-31").unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let knowledge = MedicationKnowledge::builder()
            .name("Paracetamol")
            .name("Acetaminophen")
            .cost(cost(dec!(12.40)))
            .cost(dated)
            .build()
            .unwrap();
        assert_eq!(knowledge.name().len(), 2);
        let mid_2024 = PrecisionDateTime::parse("2024-06-01").unwrap();
        let mid_2025 = PrecisionDateTime::parse("2025-06-01").unwrap();
        assert_eq!(knowledge.costs_effective_at(&mid_2024).len(), 2);
        assert_eq!(knowledge.costs_effective_at(&mid_2025).len(), 1);
    }
}
