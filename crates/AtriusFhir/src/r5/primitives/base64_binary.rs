use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for base64-encoded binary data
/// 
/// A stream of bytes, base64 encoded
/// 
/// See: [base64Binary](http://hl7.org/fhir/StructureDefinition/base64Binary)
pub type Base64Binary = Element<String, Extension>;
