//! FHIR JSON field conventions shared by the derived `Serialize` and
//! `Deserialize` impls.
//!
//! Model types are read from a JSON object one element at a time: each
//! element removes its own keys, and whatever is left afterwards is an
//! unknown element. [`JsonField`] captures how a single value kind maps onto
//! those keys:
//!
//! - complex types and resources: one key holding an object or an array of
//!   objects
//! - primitives: the value under `name` and `id`/`extension` under `_name`;
//!   lists split into two parallel arrays padded with `null`
//! - choice values: the element name plus the type suffix (`valueQuantity`)

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::element::Element;

pub type JsonObject = serde_json::Map<String, Value>;

/// How a value kind is written to and read from the keys of a FHIR JSON object.
pub trait JsonField: Sized {
    fn write_json<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<(), M::Error>;

    /// Writes a list element. Empty lists are omitted.
    fn write_json_list<M: SerializeMap>(values: &[Self], key: &str, map: &mut M) -> Result<(), M::Error>;

    /// Removes this element's keys from `object` and parses them.
    fn read_json(key: &str, object: &mut JsonObject) -> Result<Option<Self>, serde_json::Error>;

    fn read_json_list(key: &str, object: &mut JsonObject) -> Result<Vec<Self>, serde_json::Error>;
}

pub(crate) fn json_error(msg: impl Display) -> serde_json::Error {
    <serde_json::Error as serde::de::Error>::custom(msg)
}

/// Removes and checks `resourceType`.
pub fn take_resource_type(object: &mut JsonObject, expected: &str) -> Result<(), serde_json::Error> {
    match object.remove("resourceType") {
        Some(Value::String(found)) if found == expected => Ok(()),
        Some(Value::String(found)) => Err(json_error(format!(
            "expected resourceType '{expected}', found '{found}'"
        ))),
        Some(_) => Err(json_error("resourceType must be a string")),
        None => Err(json_error(format!("missing resourceType, expected '{expected}'"))),
    }
}

/// Fails on the first key no element claimed.
pub fn deny_unknown(object: &JsonObject, type_name: &str) -> Result<(), serde_json::Error> {
    match object.keys().next() {
        Some(key) => Err(json_error(format!("unknown element '{key}' in {type_name}"))),
        None => Ok(()),
    }
}

pub fn write_object_list<T, M>(values: &[T], key: &str, map: &mut M) -> Result<(), M::Error>
where
    T: Serialize,
    M: SerializeMap,
{
    if values.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, values)
}

pub fn read_object<T: DeserializeOwned>(key: &str, object: &mut JsonObject) -> Result<Option<T>, serde_json::Error> {
    match object.remove(key) {
        None => Ok(None),
        Some(Value::Null) => Err(json_error(format!("'{key}' must not be null"))),
        Some(Value::Array(_)) => Err(json_error(format!("'{key}' must be a single object, found an array"))),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| json_error(format!("{key}: {e}"))),
    }
}

pub fn read_object_list<T: DeserializeOwned>(key: &str, object: &mut JsonObject) -> Result<Vec<T>, serde_json::Error> {
    match object.remove(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Null => Err(json_error(format!("'{key}[{index}]' must not be null"))),
                item => serde_json::from_value(item).map_err(|e| json_error(format!("{key}[{index}]: {e}"))),
            })
            .collect(),
        Some(_) => Err(json_error(format!("'{key}' must be an array"))),
    }
}

/// The `_field` companion of a primitive.
#[derive(Serialize)]
struct Metadata<'a, E> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    extension: &'a [E],
}

fn is_empty_slice<E>(values: &&[E]) -> bool {
    values.is_empty()
}

impl<'a, E: Serialize> Metadata<'a, E> {
    fn of<V>(element: &'a Element<V, E>) -> Option<Self> {
        element.has_metadata().then_some(Metadata {
            id: element.id.as_deref(),
            extension: &element.extension,
        })
    }
}

fn read_metadata<E: DeserializeOwned>(key: &str, value: Value) -> Result<(Option<String>, Vec<E>), serde_json::Error> {
    let Value::Object(mut object) = value else {
        return Err(json_error(format!("'_{key}' must be an object")));
    };
    let id = match object.remove("id") {
        None => None,
        Some(Value::String(id)) => Some(id),
        Some(_) => return Err(json_error(format!("'_{key}.id' must be a string"))),
    };
    let extension = read_object_list("extension", &mut object)?;
    deny_unknown(&object, &format!("_{key}"))?;
    Ok((id, extension))
}

impl<V, E> JsonField for Element<V, E>
where
    V: Serialize + DeserializeOwned,
    E: Serialize + DeserializeOwned,
{
    fn write_json<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<(), M::Error> {
        if let Some(value) = &self.value {
            map.serialize_entry(key, value)?;
        }
        if let Some(metadata) = Metadata::of(self) {
            map.serialize_entry(&format!("_{key}"), &metadata)?;
        }
        Ok(())
    }

    fn write_json_list<M: SerializeMap>(values: &[Self], key: &str, map: &mut M) -> Result<(), M::Error> {
        if values.iter().any(|e| e.value.is_some()) {
            let primitives: Vec<Option<&V>> = values.iter().map(|e| e.value.as_ref()).collect();
            map.serialize_entry(key, &primitives)?;
        }
        if values.iter().any(Element::has_metadata) {
            let metadata: Vec<Option<Metadata<'_, E>>> = values.iter().map(Metadata::of).collect();
            map.serialize_entry(&format!("_{key}"), &metadata)?;
        }
        Ok(())
    }

    fn read_json(key: &str, object: &mut JsonObject) -> Result<Option<Self>, serde_json::Error> {
        let value = object.remove(key);
        let metadata = object.remove(&format!("_{key}"));
        if value.is_none() && metadata.is_none() {
            return Ok(None);
        }
        let value = match value {
            None => None,
            Some(Value::Null) => return Err(json_error(format!("'{key}' must not be null"))),
            Some(Value::Array(_)) => return Err(json_error(format!("'{key}' must be a single value"))),
            Some(value) => Some(serde_json::from_value(value).map_err(|e| json_error(format!("{key}: {e}")))?),
        };
        let (id, extension) = match metadata {
            None => (None, Vec::new()),
            Some(metadata) => read_metadata(key, metadata)?,
        };
        Ok(Some(Element { id, extension, value }))
    }

    fn read_json_list(key: &str, object: &mut JsonObject) -> Result<Vec<Self>, serde_json::Error> {
        let shadow_key = format!("_{key}");
        let as_array = |name: &str, value: Option<Value>| match value {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(json_error(format!("'{name}' must be an array"))),
        };
        let values = as_array(key, object.remove(key))?;
        let metadata = as_array(&shadow_key, object.remove(&shadow_key))?;

        let len = match (&values, &metadata) {
            (None, None) => return Ok(Vec::new()),
            (Some(v), Some(m)) if v.len() != m.len() => {
                return Err(json_error(format!(
                    "'{key}' and '{shadow_key}' differ in length ({} vs {})",
                    v.len(),
                    m.len()
                )));
            }
            (Some(v), _) => v.len(),
            (None, Some(m)) => m.len(),
        };

        let mut values = values.map(Vec::into_iter);
        let mut metadata = metadata.map(Vec::into_iter);
        let mut out = Vec::with_capacity(len);
        for index in 0..len {
            let value = values.as_mut().and_then(Iterator::next).filter(|v| !v.is_null());
            let meta = metadata.as_mut().and_then(Iterator::next).filter(|m| !m.is_null());
            if value.is_none() && meta.is_none() {
                return Err(json_error(format!("'{key}[{index}]' must not be null")));
            }
            let value = value
                .map(serde_json::from_value)
                .transpose()
                .map_err(|e| json_error(format!("{key}[{index}]: {e}")))?;
            let (id, extension) = match meta {
                None => (None, Vec::new()),
                Some(meta) => read_metadata(key, meta)?,
            };
            out.push(Element { id, extension, value });
        }
        Ok(out)
    }
}

/// Plain strings such as `Extension.url` have no `_field` companion.
impl JsonField for String {
    fn write_json<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry(key, self)
    }

    fn write_json_list<M: SerializeMap>(values: &[Self], key: &str, map: &mut M) -> Result<(), M::Error> {
        write_object_list(values, key, map)
    }

    fn read_json(key: &str, object: &mut JsonObject) -> Result<Option<Self>, serde_json::Error> {
        match object.remove(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(json_error(format!("'{key}' must be a string"))),
        }
    }

    fn read_json_list(key: &str, object: &mut JsonObject) -> Result<Vec<Self>, serde_json::Error> {
        read_object_list(key, object)
    }
}

/// Serializes `value` through its `JsonField` impl as the only entry of a
/// map, which is how tests and tools look at a single element.
pub fn element_to_value<T: JsonField>(key: &str, value: &T) -> Result<Value, serde_json::Error> {
    struct One<'a, T>(&'a str, &'a T);

    impl<T: JsonField> Serialize for One<'_, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            self.1.write_json(self.0, &mut map)?;
            map.end()
        }
    }

    serde_json::to_value(One(key, value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::r5::{Extension, String as FhirString};

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn primitive_with_metadata_splits_keys() {
        let name = FhirString::from("Acme").with_id("n1");
        let written = element_to_value("name", &name).unwrap();
        assert_eq!(written, json!({"name": "Acme", "_name": {"id": "n1"}}));

        let mut obj = object(written);
        let read = FhirString::read_json("name", &mut obj).unwrap().unwrap();
        assert_eq!(read, name);
        assert!(obj.is_empty());
    }

    #[test]
    fn primitive_lists_are_padded() {
        let given = vec![FhirString::from("John"), FhirString::from("Michael").with_id("g2")];
        struct Given<'a>(&'a [FhirString]);
        impl Serialize for Given<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                FhirString::write_json_list(self.0, "given", &mut map)?;
                map.end()
            }
        }
        let written = serde_json::to_value(Given(&given)).unwrap();
        assert_eq!(written, json!({"given": ["John", "Michael"], "_given": [null, {"id": "g2"}]}));

        let mut obj = object(written);
        assert_eq!(FhirString::read_json_list("given", &mut obj).unwrap(), given);
    }

    #[test]
    fn extension_only_list_entries() {
        let mut obj = object(json!({
            "given": [null, "B"],
            "_given": [{"extension": [{"url": "http://example.org/x", "valueBoolean": true}]}, null]
        }));
        let read = FhirString::read_json_list("given", &mut obj).unwrap();
        assert_eq!(read.len(), 2);
        assert!(read[0].value.is_none());
        assert_eq!(read[0].extension.len(), 1);
        assert_eq!(read[1].value.as_deref(), Some("B"));
    }

    #[test]
    fn rejects_nulls_and_mismatched_lengths() {
        let mut obj = object(json!({"given": ["A", null]}));
        assert!(FhirString::read_json_list("given", &mut obj).is_err());

        let mut obj = object(json!({"given": ["A"], "_given": [null, null]}));
        assert!(FhirString::read_json_list("given", &mut obj).is_err());

        let mut obj = object(json!({"name": null}));
        assert!(FhirString::read_json("name", &mut obj).is_err());
    }

    #[test]
    fn metadata_rejects_unknown_keys() {
        let mut obj = object(json!({"_name": {"id": "a", "colour": "red"}}));
        let err = FhirString::read_json("name", &mut obj).unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn resource_type_checks() {
        let mut obj = object(json!({"resourceType": "Medication"}));
        assert!(take_resource_type(&mut obj, "Medication").is_ok());
        let mut obj = object(json!({"resourceType": "Patient"}));
        assert!(take_resource_type(&mut obj, "Medication").is_err());
        let mut obj = object(json!({}));
        assert!(take_resource_type(&mut obj, "Medication").is_err());
    }

    #[test]
    fn empty_extension_lists_are_omitted() {
        let url = "http://example.org".to_string();
        let ext = Extension::builder()
            .url(url)
            .value(crate::r5::DataType::Boolean(true.into()))
            .build()
            .unwrap();
        let value = serde_json::to_value(&ext).unwrap();
        assert_eq!(value, json!({"url": "http://example.org", "valueBoolean": true}));
    }
}
