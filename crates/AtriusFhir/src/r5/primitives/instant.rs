use crate::element::Element;
use crate::date_time::PrecisionInstant;
use crate::r5::Extension;

/// FHIR primitive type for instant in time values (to millisecond precision)
/// 
/// An instant in time - known at least to the second
/// 
/// See: [instant](http://hl7.org/fhir/StructureDefinition/instant)
pub type Instant = Element<PrecisionInstant, Extension>;
