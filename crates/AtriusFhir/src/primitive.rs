//! Value types that back FHIR primitives and their lexical rules.

use std::fmt;

use atrius_model_support::PrimitiveValue;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::date_time::{PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime};
use crate::precise_decimal::PreciseDecimal;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("valid id regex"));
static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s]+( [^\s]+)*$").expect("valid code regex"));
static OID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^urn:oid:[0-2](\.(0|[1-9][0-9]*))+$").expect("valid oid regex"));
static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").expect("valid uuid regex")
});
static BASE64_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*([0-9a-zA-Z+/=]){4}\s*)+$").expect("valid base64 regex"));

/// A Rust type that can hold the value of a FHIR primitive.
pub trait PrimitiveKind {
    /// FHIR name of the primitive this type represents by default.
    const FHIR_TYPE: &'static str;

    fn primitive_value(&self) -> PrimitiveValue<'_>;

    /// Checks the lexical rules of `declared_type` (`"Id"`, `"PositiveInt"`, ...).
    ///
    /// On failure returns the FHIR name of the violated primitive type.
    fn check_lexical(&self, _declared_type: &str) -> Result<(), &'static str> {
        Ok(())
    }
}

impl PrimitiveKind for bool {
    const FHIR_TYPE: &'static str = "boolean";

    fn primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Boolean(*self)
    }
}

impl PrimitiveKind for i32 {
    const FHIR_TYPE: &'static str = "integer";

    fn primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Integer(i64::from(*self))
    }

    fn check_lexical(&self, declared_type: &str) -> Result<(), &'static str> {
        match declared_type {
            "PositiveInt" if *self < 1 => Err("positiveInt"),
            "UnsignedInt" if *self < 0 => Err("unsignedInt"),
            _ => Ok(()),
        }
    }
}

/// Value of a FHIR `integer64`.
///
/// Held as an `i64` but written to JSON as a string, since 64-bit integers do
/// not survive a trip through a JSON number in most consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Integer64Value(pub i64);

impl From<i64> for Integer64Value {
    fn from(value: i64) -> Self {
        Integer64Value(value)
    }
}

impl fmt::Display for Integer64Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Integer64Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

/// Reads the decimal digits of a JSON string; a bare JSON number is rejected.
impl<'de> Deserialize<'de> for Integer64Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s
                .parse::<i64>()
                .map(Integer64Value)
                .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&s), &"a 64-bit integer in a JSON string")),
            serde_json::Value::Number(n) => Err(de::Error::invalid_type(
                de::Unexpected::Other(&format!("number {n}")),
                &"a JSON string",
            )),
            serde_json::Value::Bool(b) => Err(de::Error::invalid_type(de::Unexpected::Bool(b), &"a JSON string")),
            serde_json::Value::Null => Err(de::Error::invalid_type(de::Unexpected::Unit, &"a JSON string")),
            serde_json::Value::Array(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &"a JSON string")),
            serde_json::Value::Object(_) => Err(de::Error::invalid_type(de::Unexpected::Map, &"a JSON string")),
        }
    }
}

impl PrimitiveKind for Integer64Value {
    const FHIR_TYPE: &'static str = "integer64";

    fn primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Integer(self.0)
    }
}

impl PrimitiveKind for String {
    const FHIR_TYPE: &'static str = "string";

    fn primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Text(self)
    }

    fn check_lexical(&self, declared_type: &str) -> Result<(), &'static str> {
        let ok = match declared_type {
            "Id" => ID_PATTERN.is_match(self),
            "Code" => CODE_PATTERN.is_match(self),
            "Oid" => OID_PATTERN.is_match(self),
            "Uuid" => UUID_PATTERN.is_match(self),
            "Uri" | "Url" | "Canonical" => !self.is_empty() && !self.chars().any(char::is_whitespace),
            "Base64Binary" => BASE64_PATTERN.is_match(self),
            "String" | "Markdown" | "Xhtml" => !self.trim().is_empty(),
            _ => true,
        };
        if ok {
            return Ok(());
        }
        Err(match declared_type {
            "Id" => "id",
            "Code" => "code",
            "Oid" => "oid",
            "Uuid" => "uuid",
            "Uri" => "uri",
            "Url" => "url",
            "Canonical" => "canonical",
            "Base64Binary" => "base64Binary",
            "Markdown" => "markdown",
            "Xhtml" => "xhtml",
            _ => "string",
        })
    }
}

impl PrimitiveKind for PreciseDecimal {
    const FHIR_TYPE: &'static str = "decimal";

    fn primitive_value(&self) -> PrimitiveValue<'_> {
        PrimitiveValue::Decimal(self.original_string())
    }
}

macro_rules! text_primitive {
    ($ty:ty, $name:literal) => {
        impl PrimitiveKind for $ty {
            const FHIR_TYPE: &'static str = $name;

            fn primitive_value(&self) -> PrimitiveValue<'_> {
                PrimitiveValue::Text(self.original_string())
            }
        }
    };
}

text_primitive!(PrecisionDate, "date");
text_primitive!(PrecisionDateTime, "dateTime");
text_primitive!(PrecisionInstant, "instant");
text_primitive!(PrecisionTime, "time");
