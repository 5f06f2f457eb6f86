use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{AddressType, AddressUse, Extension, Period, String};

/// FHIR Address type
///
/// An address expressed using postal conventions (as opposed to GPS or other
/// location definition formats).
///
/// See: [Address](http://hl7.org/fhir/StructureDefinition/Address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Address", kind = "complex")]
pub struct Address {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// home | work | temp | old | billing - purpose of this address
    #[fhir_serde(rename = "use")]
    r#use: Option<Element<AddressUse, Extension>>,
    /// postal | physical | both
    #[fhir_serde(rename = "type")]
    r#type: Option<Element<AddressType, Extension>>,
    /// Text representation of the address
    text: Option<String>,
    /// Street name, number, direction & P.O. Box etc.
    line: Vec<String>,
    /// Name of city, town etc.
    city: Option<String>,
    /// District name (aka county)
    district: Option<String>,
    /// Sub-unit of country (abbreviations ok)
    state: Option<String>,
    /// Postal code for area
    postal_code: Option<String>,
    /// Country (e.g. may be ISO 3166 2 or 3 letter code)
    country: Option<String>,
    /// Time period when address was/is in use
    period: Option<Period>,
    hash_cache: HashCode,
}
