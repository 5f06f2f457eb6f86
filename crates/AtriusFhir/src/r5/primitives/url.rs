use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for Uniform Resource Locators
/// 
/// A URI that is a literal reference
/// 
/// See: [url](http://hl7.org/fhir/StructureDefinition/url)
pub type Url = Element<String, Extension>;
