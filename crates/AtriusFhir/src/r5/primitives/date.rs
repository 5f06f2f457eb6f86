use crate::element::Element;
use crate::date_time::PrecisionDate;
use crate::r5::Extension;

/// FHIR primitive type for date values (year, month, day)
/// 
/// A date or partial date (e.g. just year or year + month). There is no time zone.
/// 
/// See: [date](http://hl7.org/fhir/StructureDefinition/date)
pub type Date = Element<PrecisionDate, Extension>;
