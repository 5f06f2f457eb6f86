use std::any::Any;

use atrius_model_support::{
    accept_list, accept_option, accept_with, PrimitiveValue, ValidateField, ValidationError, Visitable, Visitor,
};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::primitive::PrimitiveKind;

/// Generic element container supporting FHIR's extension mechanism.
///
/// Every FHIR primitive (`boolean`, `string`, `dateTime`, ...) may carry an
/// `id` and extensions next to, or instead of, its value.
///
/// # Type Parameters
///
/// * `V` - The value type (`bool`, `String`, `PreciseDecimal`, a code enum, ...)
/// * `E` - The extension type (the model's `Extension`)
///
/// # Examples
///
/// ```rust
/// use atrius_fhir_model::r5::{Code, DataType, Extension, String as FhirString};
///
/// let plain = FhirString::from("Hello World");
/// assert_eq!(plain.value.as_deref(), Some("Hello World"));
///
/// let extension_only = FhirString {
///     id: Some("disabled-element".to_string()),
///     extension: vec![Extension::builder()
///         .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
///         .value(DataType::Code(Code::from("unknown")))
///         .build()
///         .unwrap()],
///     value: None,
/// };
/// assert!(!extension_only.is_empty());
/// ```
///
/// # Serialization Behavior
///
/// Standalone, an element with only a value serializes as the bare value and
/// one with `id` or extensions as an object with `id`, `extension` and `value`.
/// Inside a model type the value and its metadata are split over `field` and
/// `_field` (see [`crate::serde_support`]).
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Element<V, E> {
    pub id: Option<String>,
    pub extension: Vec<E>,
    pub value: Option<V>,
}

impl<V, E> Default for Element<V, E> {
    fn default() -> Self {
        Element {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<V, E> Element<V, E> {
    pub fn new(value: V) -> Self {
        Element {
            value: Some(value),
            ..Default::default()
        }
    }

    /// Returns `true` if no value, id, or extensions are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.id.is_none() && self.extension.is_empty()
    }

    /// `true` when `id` or extensions need the `_field` companion in JSON.
    #[inline]
    pub fn has_metadata(&self) -> bool {
        self.id.is_some() || !self.extension.is_empty()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: E) -> Self {
        self.extension.push(extension);
        self
    }
}

impl<V: PrimitiveKind + 'static, E: Visitable> Visitable for Element<V, E> {
    fn type_name(&self) -> &'static str {
        V::FHIR_TYPE
    }

    fn accept(&self, element_name: &str, element_index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_with(self, element_name, element_index, visitor, |visitor| {
            accept_option(self.id.as_ref(), "id", visitor);
            accept_list(&self.extension, "extension", visitor);
        });
    }

    /// Only extensions count as children; `id` is an attribute.
    fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }

    fn has_value(&self) -> bool {
        self.value.is_some()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        self.value.as_ref().map(PrimitiveKind::primitive_value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<V: PrimitiveKind, E> ValidateField for Element<V, E> {
    fn validate_field(
        &self,
        owner: &'static str,
        element: &'static str,
        declared_type: &'static str,
    ) -> Result<(), ValidationError> {
        match &self.value {
            None if self.extension.is_empty() => Err(ValidationError::EmptyPrimitive { type_name: owner, element }),
            None => Ok(()),
            Some(value) => match value.check_lexical(declared_type) {
                Ok(()) => Ok(()),
                Err(primitive) => Err(ValidationError::InvalidPrimitive {
                    type_name: owner,
                    element,
                    primitive,
                    value: value.primitive_value().to_string(),
                }),
            },
        }
    }
}

impl<V, E> From<V> for Element<V, E> {
    fn from(value: V) -> Self {
        Element::new(value)
    }
}

impl<E> From<&str> for Element<String, E> {
    fn from(value: &str) -> Self {
        Element::new(value.to_string())
    }
}

impl<V, E> Serialize for Element<V, E>
where
    V: Serialize,
    E: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.has_metadata() {
            return match &self.value {
                Some(value) => value.serialize(serializer),
                None => serializer.serialize_none(),
            };
        }
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        if !self.extension.is_empty() {
            map.serialize_entry("extension", &self.extension)?;
        }
        if let Some(value) = &self.value {
            map.serialize_entry("value", value)?;
        }
        map.end()
    }
}

/// Accepts either a bare primitive or an object with `id`, `extension` and
/// `value` (the shape of a `_field` companion, where `value` is absent).
impl<'de, V, E> Deserialize<'de> for Element<V, E>
where
    V: DeserializeOwned,
    E: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(Element::default()),
            serde_json::Value::Object(mut map) => {
                let id = match map.remove("id") {
                    None | Some(serde_json::Value::Null) => None,
                    Some(serde_json::Value::String(id)) => Some(id),
                    Some(_) => return Err(de::Error::custom("element id must be a string")),
                };
                let extension = match map.remove("extension") {
                    None | Some(serde_json::Value::Null) => Vec::new(),
                    Some(value) => Vec::<E>::deserialize(value).map_err(de::Error::custom)?,
                };
                let value = match map.remove("value") {
                    None | Some(serde_json::Value::Null) => None,
                    Some(value) => Some(V::deserialize(value).map_err(de::Error::custom)?),
                };
                if let Some(key) = map.keys().next() {
                    return Err(de::Error::unknown_field(key, &["id", "extension", "value"]));
                }
                Ok(Element { id, extension, value })
            }
            other => Ok(Element::new(V::deserialize(other).map_err(de::Error::custom)?)),
        }
    }
}
