use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for Universally Unique Identifiers (UUIDs)
/// 
/// A UUID, represented as a URI
/// 
/// See: [uuid](http://hl7.org/fhir/StructureDefinition/uuid)
pub type Uuid = Element<String, Extension>;
