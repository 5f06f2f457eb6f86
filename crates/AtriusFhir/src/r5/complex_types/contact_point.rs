use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{ContactPointSystem, ContactPointUse, Extension, Period, PositiveInt, String};

/// FHIR ContactPoint type
///
/// Details for all kinds of technology mediated contact points for a person or
/// organization, including telephone, email, etc.
///
/// ## Constraints
/// - cpt-2: A system is required if a value is provided.
///
/// See: [ContactPoint](http://hl7.org/fhir/StructureDefinition/ContactPoint)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ContactPoint", kind = "complex")]
#[fhir_invariant(
    key = "cpt-2",
    severity = "error",
    human = "A system is required if a value is provided.",
    expr = "value.empty() or system.exists()",
    path = "ContactPoint",
    rule = "value_has_system"
)]
pub struct ContactPoint {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// phone | fax | email | pager | url | sms | other
    system: Option<Element<ContactPointSystem, Extension>>,
    /// The actual contact point details
    value: Option<String>,
    /// home | work | temp | old | mobile - purpose of this contact point
    #[fhir_serde(rename = "use")]
    r#use: Option<Element<ContactPointUse, Extension>>,
    /// Specify preferred order of use (1 = highest)
    rank: Option<PositiveInt>,
    /// Time period when the contact point was/is in use
    period: Option<Period>,
    hash_cache: HashCode,
}

impl ContactPoint {
    fn value_has_system(&self) -> bool {
        self.value.is_none() || self.system.is_some()
    }
}
