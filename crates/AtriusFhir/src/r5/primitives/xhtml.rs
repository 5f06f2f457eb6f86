use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for XHTML-formatted text with limited subset
/// 
/// xhtml Type: XHTML
/// 
/// See: [xhtml](http://hl7.org/fhir/StructureDefinition/xhtml)
pub type Xhtml = Element<String, Extension>;
