use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for logical IDs within FHIR resources
/// 
/// Any combination of letters, numerals, "-" and ".", with a length limit of 64 characters.
/// 
/// See: [id](http://hl7.org/fhir/StructureDefinition/id)
pub type Id = Element<String, Extension>;
