use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Address, CodeableConcept, ContactPoint, Extension, HumanName, Period, Reference};

/// FHIR ExtendedContactDetail type
///
/// Specifies contact information for a specific purpose over a period of time,
/// might be handled/monitored by a specific named person or organization.
///
/// See: [ExtendedContactDetail](http://hl7.org/fhir/StructureDefinition/ExtendedContactDetail)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ExtendedContactDetail", kind = "complex")]
pub struct ExtendedContactDetail {
    id: Option<String>,
    extension: Vec<Extension>,
    /// The type of contact
    purpose: Option<CodeableConcept>,
    /// Name of an individual to contact
    name: Vec<HumanName>,
    /// Contact details (e.g.phone/fax/url)
    telecom: Vec<ContactPoint>,
    /// Address for the contact
    address: Option<Address>,
    /// This contact detail is handled/monitored by a specific organization
    #[fhir_element(reference = "Organization")]
    organization: Option<Reference>,
    /// Period that this contact was valid for usage
    period: Option<Period>,
    hash_cache: HashCode,
}
