use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{Extension, NameUse, Period, String};

/// FHIR HumanName type
///
/// A name, normally of a human, that can be used for other living entities
/// (e.g. animals but not organizations) that have been assigned names by a
/// human and may need the use of name parts or the need for usage
/// information.
///
/// See: [HumanName](http://hl7.org/fhir/StructureDefinition/HumanName)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "HumanName", kind = "complex")]
pub struct HumanName {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// usual | official | temp | nickname | anonymous | old | maiden
    #[fhir_serde(rename = "use")]
    r#use: Option<Element<NameUse, Extension>>,
    /// Text representation of the full name
    text: Option<String>,
    /// Family name (often called 'Surname')
    family: Option<String>,
    /// Given names (not always 'first'). Includes middle names
    given: Vec<String>,
    /// Parts that come before the name
    prefix: Vec<String>,
    /// Parts that come after the name
    suffix: Vec<String>,
    /// Time period when name was/is in use
    period: Option<Period>,
    hash_cache: HashCode,
}
