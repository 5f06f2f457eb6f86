use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{CodeableConcept, Extension, IdentifierUse, Period, Reference, String, Uri};

/// FHIR Identifier type
///
/// An identifier - identifies some entity uniquely and unambiguously.
/// Typically this is used for business identifiers.
///
/// ## Constraints
/// - ident-1: Identifier with no value SHALL have a data absent reason extension
///
/// See: [Identifier](http://hl7.org/fhir/StructureDefinition/Identifier)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Identifier", kind = "complex")]
#[fhir_invariant(
    key = "ident-1",
    severity = "warning",
    human = "Identifier with no value SHALL have a data absent reason extension",
    expr = "value.exists() or value.extension('http://hl7.org/fhir/StructureDefinition/data-absent-reason').exists()",
    path = "Identifier"
)]
pub struct Identifier {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// usual | official | temp | secondary | old (If known)
    #[fhir_serde(rename = "use")]
    r#use: Option<Element<IdentifierUse, Extension>>,
    /// Description of identifier
    #[fhir_serde(rename = "type")]
    r#type: Option<CodeableConcept>,
    /// The namespace for the identifier value
    system: Option<Uri>,
    /// The value that is unique
    value: Option<String>,
    /// Time period when id is/was valid for use
    period: Option<Period>,
    /// Organization that issued id (may be just text)
    #[fhir_element(reference = "Organization")]
    assigner: Option<Box<Reference>>,
    hash_cache: HashCode,
}
