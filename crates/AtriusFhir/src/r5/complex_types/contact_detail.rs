use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{ContactPoint, Extension, String};

/// FHIR ContactDetail type
///
/// Specifies contact information for a person or organization.
///
/// See: [ContactDetail](http://hl7.org/fhir/StructureDefinition/ContactDetail)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ContactDetail", kind = "complex")]
pub struct ContactDetail {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Name of an individual to contact
    name: Option<String>,
    /// Contact details for individual or organization
    telecom: Vec<ContactPoint>,
    hash_cache: HashCode,
}
