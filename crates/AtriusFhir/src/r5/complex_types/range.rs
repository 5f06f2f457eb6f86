use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Extension, Quantity};

/// FHIR Range type
///
/// A set of ordered Quantities defined by a low and high limit.
///
/// ## Constraints
/// - rng-2: If present, low SHALL have a lower value than high
///
/// See: [Range](http://hl7.org/fhir/StructureDefinition/Range)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Range", kind = "complex")]
#[fhir_invariant(
    key = "rng-2",
    severity = "error",
    human = "If present, low SHALL have a lower value than high",
    expr = "low.empty() or high.empty() or (low <= high)",
    path = "Range",
    rule = "low_not_above_high"
)]
pub struct Range {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Low limit
    low: Option<Quantity>,
    /// High limit
    high: Option<Quantity>,
    hash_cache: HashCode,
}

impl Range {
    fn low_not_above_high(&self) -> bool {
        match (
            self.low.as_ref().and_then(Quantity::decimal_value),
            self.high.as_ref().and_then(Quantity::decimal_value),
        ) {
            (Some(low), Some(high)) => low <= high,
            _ => true,
        }
    }
}
