use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Extension, Quantity};

/// FHIR Ratio type
///
/// A relationship of two Quantity values - expressed as a numerator and a
/// denominator.
///
/// ## Constraints
/// - rat-1: Numerator and denominator SHALL both be present, or both are absent.
///   If both are absent, there SHALL be some extension present
///
/// See: [Ratio](http://hl7.org/fhir/StructureDefinition/Ratio)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Ratio", kind = "complex")]
#[fhir_invariant(
    key = "rat-1",
    severity = "error",
    human = "Numerator and denominator SHALL both be present, or both are absent. If both are absent, there SHALL be some extension present",
    expr = "(numerator.exists() and denominator.exists()) or (numerator.empty() and denominator.empty() and extension.exists())",
    path = "Ratio",
    rule = "numerator_and_denominator"
)]
pub struct Ratio {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Numerator value
    numerator: Option<Quantity>,
    /// Denominator value
    denominator: Option<Quantity>,
    hash_cache: HashCode,
}

impl Ratio {
    fn numerator_and_denominator(&self) -> bool {
        match (&self.numerator, &self.denominator) {
            (Some(_), Some(_)) => true,
            (None, None) => !self.extension.is_empty(),
            _ => false,
        }
    }
}
