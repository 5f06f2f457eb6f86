use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// High-precision decimal that preserves its original JSON representation.
///
/// FHIR requires decimals to round-trip with their original precision
/// (`"12.340"` stays `12.340`, `1.0e2` stays `1.0e2`). The parsed [`Decimal`]
/// drives equality, ordering and hashing; the original text drives
/// serialization.
///
/// # Examples
///
/// ```rust
/// use atrius_fhir_model::PreciseDecimal;
/// use rust_decimal::Decimal;
///
/// let a: PreciseDecimal = "10.0".parse().unwrap();
/// let b: PreciseDecimal = "10.00".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b.original_string(), "10.00");
/// assert_eq!(a.value(), Decimal::new(100, 1));
/// ```
#[derive(Debug, Clone)]
pub struct PreciseDecimal {
    value: Decimal,
    original_string: Arc<str>,
}

impl PreciseDecimal {
    /// Parses a FHIR decimal, accepting scientific notation (`1.23e2`, `1.23E2`).
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed != s {
            return None;
        }
        let normalized = s.replace('E', "e");
        let value = if normalized.contains('e') {
            Decimal::from_scientific(&normalized).ok()?
        } else {
            Decimal::from_str(&normalized).ok()?
        };
        Some(Self {
            value,
            original_string: Arc::from(s),
        })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn original_string(&self) -> &str {
        &self.original_string
    }
}

impl PartialEq for PreciseDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PreciseDecimal {}

impl Hash for PreciseDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.normalize().hash(state);
    }
}

impl PartialOrd for PreciseDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreciseDecimal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl From<Decimal> for PreciseDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            original_string: Arc::from(value.to_string()),
            value,
        }
    }
}

impl FromStr for PreciseDecimal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid FHIR decimal: {s}"))
    }
}

impl std::fmt::Display for PreciseDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original_string)
    }
}

/// Writes the original text as a raw JSON number.
impl Serialize for PreciseDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match serde_json::value::RawValue::from_string(self.original_string.to_string()) {
            Ok(raw_value) => raw_value.serialize(serializer),
            Err(e) => Err(serde::ser::Error::custom(format!(
                "failed to serialize decimal '{}': {}",
                self.original_string, e
            ))),
        }
    }
}

/// Reads a JSON number, keeping its exact text (serde_json's
/// `arbitrary_precision` feature keeps the digits intact).
impl<'de> Deserialize<'de> for PreciseDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => {
                let original_string = n.to_string();
                PreciseDecimal::parse(&original_string)
                    .ok_or_else(|| de::Error::custom(format!("decimal out of range: {original_string}")))
            }
            serde_json::Value::String(s) => Err(de::Error::invalid_type(de::Unexpected::Str(&s), &"a JSON number")),
            serde_json::Value::Bool(b) => Err(de::Error::invalid_type(de::Unexpected::Bool(b), &"a JSON number")),
            serde_json::Value::Null => Err(de::Error::invalid_type(de::Unexpected::Unit, &"a JSON number")),
            serde_json::Value::Array(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &"a JSON number")),
            serde_json::Value::Object(_) => Err(de::Error::invalid_type(de::Unexpected::Map, &"a JSON number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keeps_trailing_zeros_through_json() {
        let parsed: PreciseDecimal = serde_json::from_str("12.340").unwrap();
        assert_eq!(parsed.original_string(), "12.340");
        assert_eq!(parsed.value(), dec!(12.34));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "12.340");
    }

    #[test]
    fn scientific_notation() {
        let parsed = PreciseDecimal::parse("1.5E2").unwrap();
        assert_eq!(parsed.value(), dec!(150));
        assert_eq!(parsed.to_string(), "1.5E2");
    }

    #[test]
    fn rejects_strings_and_garbage() {
        assert!(serde_json::from_str::<PreciseDecimal>("\"1.0\"").is_err());
        assert!(PreciseDecimal::parse("abc").is_none());
        assert!(PreciseDecimal::parse(" 1").is_none());
    }

    #[test]
    fn equal_values_hash_equally() {
        use std::hash::DefaultHasher;
        let hash = |d: &PreciseDecimal| {
            let mut h = DefaultHasher::new();
            d.hash(&mut h);
            h.finish()
        };
        let a = PreciseDecimal::parse("2.50").unwrap();
        let b = PreciseDecimal::parse("2.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }
}
