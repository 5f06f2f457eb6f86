use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type PositiveInt
/// 
/// An integer with a value that is positive (e.g. >0)
/// 
/// See: [positiveInt](http://hl7.org/fhir/StructureDefinition/positiveInt)
pub type PositiveInt = Element<i32, Extension>;
