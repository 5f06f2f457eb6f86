use std::any::Any;

use atrius_model_support::{
    ChoiceType, PrimitiveValue, ReferenceTarget, ValidateField, ValidationError, Visitable, Visitor,
};
use serde::ser::SerializeMap;

use crate::r5::*;
use crate::serde_support::{json_error, JsonField, JsonObject};

macro_rules! data_types {
    (
        primitive { $($pvariant:ident),+ $(,)? }
        complex { $($cvariant:ident),+ $(,)? }
    ) => {
        /// Runtime value of a choice (`[x]`) element.
        ///
        /// Any R5 data type a choice element can hold. Which variants a given
        /// element accepts is declared on the owning field and checked when the
        /// owner is built. Complex variants are boxed because several of them
        /// can themselves hold a `DataType` (through `Extension`, `Annotation`
        /// or `UsageContext`).
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum DataType {
            $($pvariant($pvariant),)+
            $($cvariant(Box<$cvariant>),)+
        }

        /// JSON type suffixes, e.g. `Quantity` in `valueQuantity`.
        pub const CHOICE_SUFFIXES: &[&str] = &[$(stringify!($pvariant),)+ $(stringify!($cvariant),)+];

        impl ChoiceType for DataType {
            fn choice_type_name(&self) -> &'static str {
                match self {
                    $(DataType::$pvariant(_) => stringify!($pvariant),)+
                    $(DataType::$cvariant(_) => stringify!($cvariant),)+
                }
            }
        }

        impl DataType {
            fn as_visitable(&self) -> &dyn Visitable {
                match self {
                    $(DataType::$pvariant(value) => value,)+
                    $(DataType::$cvariant(value) => value.as_ref(),)+
                }
            }

            fn read_variant(
                suffix: &str,
                key: &str,
                object: &mut JsonObject,
            ) -> Result<Option<DataType>, serde_json::Error> {
                match suffix {
                    $(stringify!($pvariant) => Ok(<$pvariant as JsonField>::read_json(key, object)?.map(DataType::$pvariant)),)+
                    $(stringify!($cvariant) => Ok(<$cvariant as JsonField>::read_json(key, object)?
                        .map(|value| DataType::$cvariant(Box::new(value)))),)+
                    other => Err(json_error(format!("unsupported choice type '{other}'"))),
                }
            }
        }

        impl JsonField for DataType {
            fn write_json<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<(), M::Error> {
                let key = format!("{key}{}", self.choice_type_name());
                match self {
                    $(DataType::$pvariant(value) => value.write_json(&key, map),)+
                    $(DataType::$cvariant(value) => value.as_ref().write_json(&key, map),)+
                }
            }

            fn write_json_list<M: SerializeMap>(values: &[Self], key: &str, _map: &mut M) -> Result<(), M::Error> {
                if values.is_empty() {
                    return Ok(());
                }
                Err(<M::Error as serde::ser::Error>::custom(format!("choice element '{key}[x]' cannot repeat")))
            }

            fn read_json(key: &str, object: &mut JsonObject) -> Result<Option<Self>, serde_json::Error> {
                let present: Vec<&str> = CHOICE_SUFFIXES
                    .iter()
                    .copied()
                    .filter(|suffix| {
                        let name = format!("{key}{suffix}");
                        object.contains_key(&name) || object.contains_key(&format!("_{name}"))
                    })
                    .collect();
                match present.as_slice() {
                    [] => Ok(None),
                    [suffix] => DataType::read_variant(suffix, &format!("{key}{suffix}"), object),
                    _ => Err(json_error(format!(
                        "'{key}[x]' has more than one value: {}",
                        present.join(", ")
                    ))),
                }
            }

            fn read_json_list(key: &str, object: &mut JsonObject) -> Result<Vec<Self>, serde_json::Error> {
                Ok(DataType::read_json(key, object)?.into_iter().collect())
            }
        }

        impl ValidateField for DataType {
            /// Primitive variants are checked against their own lexical rules.
            fn validate_field(
                &self,
                owner: &'static str,
                element: &'static str,
                _declared_type: &'static str,
            ) -> Result<(), ValidationError> {
                let declared = self.choice_type_name();
                match self {
                    $(DataType::$pvariant(value) => value.validate_field(owner, element, declared),)+
                    _ => Ok(()),
                }
            }
        }

        $(
            impl From<$cvariant> for DataType {
                fn from(value: $cvariant) -> Self {
                    DataType::$cvariant(Box::new(value))
                }
            }
        )+
    };
}

data_types! {
    primitive {
        Base64Binary, Boolean, Canonical, Code, Date, DateTime, Decimal, Id, Instant, Integer,
        Integer64, Markdown, Oid, PositiveInt, String, Time, UnsignedInt, Uri, Url, Uuid,
    }
    complex {
        Address, Annotation, Attachment, CodeableConcept, CodeableReference, Coding, ContactDetail,
        ContactPoint, ExtendedContactDetail, HumanName, Identifier, Meta, Money, Period, Quantity,
        Range, Ratio, Reference, RelatedArtifact, SampledData, UsageContext,
    }
}

impl DataType {
    /// The held value as a concrete type, e.g. `value.get::<Quantity>()`.
    pub fn get<T: Visitable>(&self) -> Option<&T> {
        self.as_visitable().downcast_ref::<T>()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DataType::Base64Binary(_)
                | DataType::Boolean(_)
                | DataType::Canonical(_)
                | DataType::Code(_)
                | DataType::Date(_)
                | DataType::DateTime(_)
                | DataType::Decimal(_)
                | DataType::Id(_)
                | DataType::Instant(_)
                | DataType::Integer(_)
                | DataType::Integer64(_)
                | DataType::Markdown(_)
                | DataType::Oid(_)
                | DataType::PositiveInt(_)
                | DataType::String(_)
                | DataType::Time(_)
                | DataType::UnsignedInt(_)
                | DataType::Uri(_)
                | DataType::Url(_)
                | DataType::Uuid(_)
        )
    }
}

// Primitive aliases share Rust types (`Code` and `String` are both
// `Element<String, Extension>`), so conversions pick the general variant.
impl From<String> for DataType {
    fn from(value: String) -> Self {
        DataType::String(value)
    }
}

impl From<Boolean> for DataType {
    fn from(value: Boolean) -> Self {
        DataType::Boolean(value)
    }
}

impl From<Integer> for DataType {
    fn from(value: Integer) -> Self {
        DataType::Integer(value)
    }
}

impl From<Integer64> for DataType {
    fn from(value: Integer64) -> Self {
        DataType::Integer64(value)
    }
}

impl From<Decimal> for DataType {
    fn from(value: Decimal) -> Self {
        DataType::Decimal(value)
    }
}

impl From<Date> for DataType {
    fn from(value: Date) -> Self {
        DataType::Date(value)
    }
}

impl From<DateTime> for DataType {
    fn from(value: DateTime) -> Self {
        DataType::DateTime(value)
    }
}

impl From<Instant> for DataType {
    fn from(value: Instant) -> Self {
        DataType::Instant(value)
    }
}

impl From<Time> for DataType {
    fn from(value: Time) -> Self {
        DataType::Time(value)
    }
}

impl ReferenceTarget for DataType {
    fn reference_parts(&self) -> Option<(Option<&str>, Option<&str>)> {
        match self {
            DataType::Reference(reference) => reference.reference_parts(),
            DataType::CodeableReference(reference) => reference.reference_parts(),
            _ => None,
        }
    }
}

/// Traversal sees the held value directly; the union is not a node itself.
impl Visitable for DataType {
    fn type_name(&self) -> &'static str {
        self.as_visitable().type_name()
    }

    fn accept(&self, element_name: &str, element_index: Option<usize>, visitor: &mut dyn Visitor) {
        self.as_visitable().accept(element_name, element_index, visitor)
    }

    fn has_children(&self) -> bool {
        self.as_visitable().has_children()
    }

    fn has_value(&self) -> bool {
        self.as_visitable().has_value()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        self.as_visitable().primitive_value()
    }

    fn as_any(&self) -> &dyn Any {
        self.as_visitable().as_any()
    }

    fn validate_node(&self) -> Result<(), ValidationError> {
        self.as_visitable().validate_node()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::serde_support::element_to_value;

    #[test]
    fn choice_values_carry_type_suffix() {
        let value = DataType::from(Quantity::builder().value(rust_decimal::Decimal::new(15, 1)).build().unwrap());
        assert_eq!(value.choice_type_name(), "Quantity");
        assert_eq!(element_to_value("value", &value).unwrap(), json!({"valueQuantity": {"value": 1.5}}));

        let code = DataType::Code(Code::from("active").with_id("c1"));
        assert_eq!(
            element_to_value("value", &code).unwrap(),
            json!({"valueCode": "active", "_valueCode": {"id": "c1"}})
        );
    }

    #[test]
    fn reads_exactly_one_choice() {
        let mut object = match json!({"valueBoolean": true, "other": 1}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let read = DataType::read_json("value", &mut object).unwrap().unwrap();
        assert_eq!(read, DataType::Boolean(true.into()));
        assert!(object.contains_key("other"));

        let mut object = match json!({"valueBoolean": true, "valueString": "x"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert!(DataType::read_json("value", &mut object).is_err());
    }

    #[test]
    fn extension_only_primitive_choice() {
        let mut object = match json!({"_valueDate": {"extension": [{"url": "http://x", "valueCode": "masked"}]}}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let read = DataType::read_json("value", &mut object).unwrap().unwrap();
        assert_eq!(read.choice_type_name(), "Date");
        assert!(!read.has_value());
    }

    #[test]
    fn primitive_variants_use_their_own_lexical_rules() {
        let bad_code = DataType::Code(Code::from("two  spaces"));
        assert!(matches!(
            bad_code.validate_field("Extension", "value", "DataType"),
            Err(ValidationError::InvalidPrimitive { primitive: "code", .. })
        ));
        let same_as_string = DataType::String(String::from("two  spaces"));
        assert!(same_as_string.validate_field("Extension", "value", "DataType").is_ok());
    }

    #[test]
    fn downcast_through_union() {
        let value = DataType::from(Coding::builder().code("x").build().unwrap());
        assert!(value.get::<Coding>().is_some());
        assert!(value.get::<Quantity>().is_none());
        assert_eq!(value.type_name(), "Coding");
        assert!(!value.is_primitive());
    }
}
