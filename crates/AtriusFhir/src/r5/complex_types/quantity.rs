use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{Code, Decimal, Extension, QuantityComparator, String, Uri};

/// FHIR Quantity type
///
/// A measured amount (or an amount that can potentially be measured). Note
/// that measured amounts include amounts that are not precisely quantified,
/// including amounts involving arbitrary units and floating currencies.
///
/// ## Constraints
/// - qty-3: If a code for the unit is present, the system SHALL also be present
///
/// See: [Quantity](http://hl7.org/fhir/StructureDefinition/Quantity)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Quantity", kind = "complex")]
#[fhir_invariant(
    key = "qty-3",
    severity = "error",
    human = "If a code for the unit is present, the system SHALL also be present",
    expr = "code.empty() or system.exists()",
    path = "Quantity",
    rule = "code_has_system"
)]
pub struct Quantity {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Numerical value (with implicit precision)
    value: Option<Decimal>,
    /// < | <= | >= | > | ad - how to understand the value
    comparator: Option<Element<QuantityComparator, Extension>>,
    /// Unit representation
    unit: Option<String>,
    /// System that defines coded unit form
    system: Option<Uri>,
    /// Coded form of the unit
    code: Option<Code>,
    hash_cache: HashCode,
}

impl Quantity {
    fn code_has_system(&self) -> bool {
        self.code.is_none() || self.system.is_some()
    }

    /// A UCUM quantity, e.g. `Quantity::ucum(dec!(5), "mg")`.
    pub fn ucum(value: rust_decimal::Decimal, unit: &str) -> Result<Self, atrius_model_support::ValidationError> {
        Quantity::builder()
            .value(value)
            .unit(unit)
            .system("http://unitsofmeasure.org")
            .code(unit)
            .build()
    }

    pub(crate) fn decimal_value(&self) -> Option<rust_decimal::Decimal> {
        self.value.as_ref().and_then(|v| v.value.as_ref()).map(|d| d.value())
    }
}
