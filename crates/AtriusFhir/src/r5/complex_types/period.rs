use std::cmp::Ordering;

use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::date_time::PrecisionDateTime;
use crate::r5::{DateTime, Extension};

/// FHIR Period type
///
/// A time period defined by a start and end date and optionally time.
///
/// ## Constraints
/// - per-1: If present, start SHALL have a lower or equal value than end
///
/// See: [Period](http://hl7.org/fhir/StructureDefinition/Period)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Period", kind = "complex")]
#[fhir_invariant(
    key = "per-1",
    severity = "error",
    human = "If present, start SHALL have a lower or equal value than end",
    expr = "start.hasValue().not() or end.hasValue().not() or (start.lowBoundary() <= end.highBoundary())",
    path = "Period",
    rule = "start_before_end"
)]
pub struct Period {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Starting time with inclusive boundary
    start: Option<DateTime>,
    /// End time with inclusive boundary, if not ongoing
    end: Option<DateTime>,
    hash_cache: HashCode,
}

impl Period {
    /// Values that cannot be ordered (mixed precision on the same day) pass.
    fn start_before_end(&self) -> bool {
        let start = self.start.as_ref().and_then(|s| s.value.as_ref());
        let end = self.end.as_ref().and_then(|e| e.value.as_ref());
        match (start, end) {
            (Some(start), Some(end)) => start.compare(end) != Some(Ordering::Greater),
            _ => true,
        }
    }

    /// `true` when `at` falls inside the period. Open ends are unbounded and
    /// boundaries that cannot be compared with `at` do not exclude it.
    pub fn contains(&self, at: &PrecisionDateTime) -> bool {
        let start = self.start.as_ref().and_then(|s| s.value.as_ref());
        let end = self.end.as_ref().and_then(|e| e.value.as_ref());
        let after_start = start.is_none_or(|start| start.compare(at) != Some(Ordering::Greater));
        let before_end = end.is_none_or(|end| end.compare(at) != Some(Ordering::Less));
        after_start && before_end
    }
}
