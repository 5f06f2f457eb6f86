use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type UnsignedInt
/// 
/// An integer with a value that is not negative (e.g. >= 0)
/// 
/// See: [unsignedInt](http://hl7.org/fhir/StructureDefinition/unsignedInt)
pub type UnsignedInt = Element<i32, Extension>;
