use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Canonical, Code, Decimal, Extension, PositiveInt, Quantity, String};

/// FHIR SampledData type
///
/// A series of measurements taken by a device, with upper and lower limits.
/// There may be more than one dimension in the data.
///
/// ## Constraints
/// - sdd-1: A SampledData SAHLL have either an interval and offsets but not both
///
/// See: [SampledData](http://hl7.org/fhir/StructureDefinition/SampledData)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "SampledData", kind = "complex")]
#[fhir_invariant(
    key = "sdd-1",
    severity = "error",
    human = "A SampledData SAHLL have either an interval and offsets but not both",
    expr = "interval.exists().not() xor offsets.exists().not()",
    path = "SampledData",
    rule = "interval_xor_offsets"
)]
pub struct SampledData {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Zero value and units
    #[fhir_element(required)]
    origin: Quantity,
    /// Number of intervalUnits between samples
    interval: Option<Decimal>,
    /// The measurement unit of the interval between samples
    #[fhir_element(required)]
    interval_unit: Code,
    /// Multiply data by this before adding to origin
    factor: Option<Decimal>,
    /// Lower limit of detection
    lower_limit: Option<Decimal>,
    /// Upper limit of detection
    upper_limit: Option<Decimal>,
    /// Number of sample points at each time point
    #[fhir_element(required)]
    dimensions: PositiveInt,
    /// Defines the codes used in the data
    code_map: Option<Canonical>,
    /// Offsets, typically in time, at which data values were taken
    offsets: Option<String>,
    /// Decimal values with spaces, or "E" | "U" | "L", or another code
    data: Option<String>,
    hash_cache: HashCode,
}

impl SampledData {
    fn interval_xor_offsets(&self) -> bool {
        self.interval.is_some() != self.offsets.is_some()
    }
}
