use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type Integer
/// 
/// A whole number
/// 
/// See: [integer](http://hl7.org/fhir/StructureDefinition/integer)
pub type Integer = Element<i32, Extension>;
