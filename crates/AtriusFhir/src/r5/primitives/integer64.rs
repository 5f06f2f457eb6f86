use crate::element::Element;
use crate::primitive::Integer64Value;
use crate::r5::Extension;

/// FHIR primitive type Integer64
/// 
/// A very large whole number
/// 
/// See: [integer64](http://hl7.org/fhir/StructureDefinition/integer64)
pub type Integer64 = Element<Integer64Value, Extension>;

impl From<i64> for Integer64 {
    fn from(value: i64) -> Self {
        Element::new(Integer64Value(value))
    }
}
