use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for Object Identifiers (OIDs)
/// 
/// An OID represented as a URI
/// 
/// See: [oid](http://hl7.org/fhir/StructureDefinition/oid)
pub type Oid = Element<String, Extension>;
