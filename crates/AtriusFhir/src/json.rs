//! Reading and writing FHIR JSON.
//!
//! All readers go through the validating builders, so a value returned from
//! here satisfies the same constraints as one built in code.
//!
//! ```rust
//! use atrius_fhir_model::json::{parse_resource, to_json_string};
//!
//! let json = r#"{"resourceType":"Medication","id":"m1","status":"active"}"#;
//! let resource = parse_resource(json).unwrap();
//! assert_eq!(resource.resource_type(), "Medication");
//! assert_eq!(to_json_string(&resource).unwrap(), json);
//! ```

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use crate::r5::Resource;
use crate::serde_support::json_error;

/// Parses any supported resource, dispatching on `resourceType`.
pub fn parse_resource(json: &str) -> ModelResult<Resource> {
    resource_from_value(serde_json::from_str(json)?)
}

pub fn parse_resource_reader(reader: impl Read) -> ModelResult<Resource> {
    resource_from_value(serde_json::from_reader(reader)?)
}

/// Parses a known model type, e.g. `parse::<Medication>(json)`.
pub fn parse<T: DeserializeOwned>(json: &str) -> ModelResult<T> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_json_string<T: Serialize>(value: &T) -> ModelResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn to_json_string_pretty<T: Serialize>(value: &T) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_json_value<T: Serialize>(value: &T) -> ModelResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn resource_from_value(value: Value) -> ModelResult<Resource> {
    let Value::Object(object) = value else {
        return Err(json_error("a resource must be a JSON object").into());
    };
    if let Some(name) = object.get("resourceType").and_then(Value::as_str)
        && !Resource::SUPPORTED.contains(&name)
    {
        tracing::debug!(resource_type = name, "resource type not carried by the model");
        return Err(ModelError::UnknownResourceType(name.to_string()));
    }
    Ok(Resource::from_json_object(object)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r5::Substance;

    #[test]
    fn unsupported_resource_type_is_reported_by_name() {
        let err = parse_resource(r#"{"resourceType":"Patient","id":"p1"}"#).unwrap_err();
        assert!(matches!(err, ModelError::UnknownResourceType(name) if name == "Patient"));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(matches!(parse_resource("[1, 2]"), Err(ModelError::Json(_))));
        assert!(matches!(parse_resource("{"), Err(ModelError::Json(_))));
    }

    #[test]
    fn typed_parse_checks_resource_type() {
        let json = r#"{"resourceType":"Substance","instance":true,"code":{"concept":{"text":"water"}}}"#;
        let substance: Substance = parse(json).unwrap();
        assert!(substance.is_instance());
        assert!(parse::<Substance>(&json.replace("Substance", "Medication")).is_err());
    }

    #[test]
    fn reader_and_string_agree() {
        let json = r#"{"resourceType":"Parameters","parameter":[{"name":"n","valueInteger":1}]}"#;
        let from_str = parse_resource(json).unwrap();
        let from_reader = parse_resource_reader(json.as_bytes()).unwrap();
        assert_eq!(from_str, from_reader);
        assert_eq!(to_json_value(&from_str).unwrap(), serde_json::from_str::<Value>(json).unwrap());
    }
}
