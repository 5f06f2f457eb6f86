use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Code, Decimal, Extension};

/// FHIR Money type
///
/// An amount of economic utility in some recognized currency.
///
/// See: [Money](http://hl7.org/fhir/StructureDefinition/Money)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Money", kind = "complex")]
pub struct Money {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Numerical value (with implicit precision)
    value: Option<Decimal>,
    /// ISO 4217 Currency Code
    currency: Option<Code>,
    hash_cache: HashCode,
}
