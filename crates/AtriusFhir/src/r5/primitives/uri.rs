use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type Uri
/// 
/// String of characters used to identify a name or a resource
/// 
/// See: [uri](http://hl7.org/fhir/StructureDefinition/uri)
pub type Uri = Element<String, Extension>;
