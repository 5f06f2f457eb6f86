use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Coding, DataType, Extension};

/// FHIR UsageContext type
///
/// Specifies clinical/business/etc. metadata that can be used to retrieve,
/// index and/or categorize an artifact.
///
/// See: [UsageContext](http://hl7.org/fhir/StructureDefinition/UsageContext)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "UsageContext", kind = "complex")]
pub struct UsageContext {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Type of context being specified
    #[fhir_element(required)]
    code: Coding,
    /// Value that defines the context
    #[fhir_element(
        required,
        choice = "CodeableConcept|Quantity|Range|Reference",
        reference = "PlanDefinition|ResearchStudy|InsurancePlan|HealthcareService|Group|Location|Organization"
    )]
    value: DataType,
    hash_cache: HashCode,
}
