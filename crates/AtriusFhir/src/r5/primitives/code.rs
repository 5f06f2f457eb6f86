use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type Code
/// 
/// A string which has at least one character and no leading or trailing whitespace and where there is no whitespace other than single spaces in the contents
/// 
/// See: [code](http://hl7.org/fhir/StructureDefinition/code)
pub type Code = Element<String, Extension>;
