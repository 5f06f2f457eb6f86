use crate::element::Element;
use crate::date_time::PrecisionDateTime;
use crate::r5::Extension;

/// FHIR primitive type for date and time values
/// 
/// A date, date-time or partial date (e.g. just year or year + month). If hours and minutes are specified, a time zone SHALL be populated.
/// 
/// See: [dateTime](http://hl7.org/fhir/StructureDefinition/dateTime)
pub type DateTime = Element<PrecisionDateTime, Extension>;
