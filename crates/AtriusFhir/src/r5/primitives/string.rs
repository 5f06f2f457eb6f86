use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type String
/// 
/// A sequence of Unicode characters
/// 
/// See: [string](http://hl7.org/fhir/StructureDefinition/string)
pub type String = Element<std::string::String, Extension>;
