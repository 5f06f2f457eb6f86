use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type Boolean
/// 
/// Value of "true" or "false"
/// 
/// See: [boolean](http://hl7.org/fhir/StructureDefinition/boolean)
pub type Boolean = Element<bool, Extension>;
