use crate::element::Element;
use crate::date_time::PrecisionTime;
use crate::r5::Extension;

/// FHIR primitive type for time of day values
/// 
/// A time during the day, with no date specified
/// 
/// See: [time](http://hl7.org/fhir/StructureDefinition/time)
pub type Time = Element<PrecisionTime, Extension>;
