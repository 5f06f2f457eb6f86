use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for canonical URLs that reference FHIR resources
/// 
/// A URI that is a reference to a canonical URL on a FHIR resource
/// 
/// See: [canonical](http://hl7.org/fhir/StructureDefinition/canonical)
pub type Canonical = Element<String, Extension>;
