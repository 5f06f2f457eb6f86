use crate::element::Element;
use crate::precise_decimal::PreciseDecimal;
use crate::r5::Extension;

/// FHIR primitive type Decimal
/// 
/// A rational number with implicit precision
/// 
/// See: [decimal](http://hl7.org/fhir/StructureDefinition/decimal)
pub type Decimal = Element<PreciseDecimal, Extension>;

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Element::new(PreciseDecimal::from(value))
    }
}
