use std::any::Any;

use atrius_model_support::{PrimitiveValue, ValidateField, ValidationError, Visitable, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::r5::*;
use crate::serde_support::{self, json_error, JsonField, JsonObject};

macro_rules! resources {
    ($($variant:ident),+ $(,)?) => {
        /// Any resource the model carries, e.g. a `contained` entry or
        /// `Parameters.parameter.resource`.
        ///
        /// JSON is dispatched on `resourceType`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Resource {
            $($variant(Box<$variant>),)+
        }

        impl Resource {
            /// Resource types this model can read.
            pub const SUPPORTED: &'static [&'static str] = &[$(stringify!($variant)),+];

            pub fn resource_type(&self) -> &'static str {
                match self {
                    $(Resource::$variant(_) => stringify!($variant),)+
                }
            }

            /// Logical id, if any.
            pub fn id(&self) -> Option<&str> {
                match self {
                    $(Resource::$variant(resource) => resource.id().and_then(|id| id.value.as_deref()),)+
                }
            }

            pub fn meta(&self) -> Option<&Meta> {
                match self {
                    $(Resource::$variant(resource) => resource.meta(),)+
                }
            }

            fn as_visitable(&self) -> &dyn Visitable {
                match self {
                    $(Resource::$variant(resource) => resource.as_ref(),)+
                }
            }

            /// Parses a JSON object whose `resourceType` names a supported resource.
            pub fn from_json_object(object: JsonObject) -> Result<Resource, serde_json::Error> {
                let resource_type = match object.get("resourceType") {
                    Some(Value::String(name)) => name.clone(),
                    Some(_) => return Err(json_error("resourceType must be a string")),
                    None => return Err(json_error("missing resourceType")),
                };
                match resource_type.as_str() {
                    $(stringify!($variant) => {
                        let resource: $variant = serde_json::from_value(Value::Object(object))?;
                        Ok(Resource::$variant(Box::new(resource)))
                    })+
                    other => Err(json_error(format!("unsupported resourceType '{other}'"))),
                }
            }
        }

        impl Serialize for Resource {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match self {
                    $(Resource::$variant(resource) => resource.serialize(serializer),)+
                }
            }
        }

        $(
            impl From<$variant> for Resource {
                fn from(resource: $variant) -> Self {
                    Resource::$variant(Box::new(resource))
                }
            }
        )+
    };
}

resources!(Medication, MedicationKnowledge, ObservationDefinition, Parameters, Substance);

impl Resource {
    /// `contained` of a domain resource; empty for `Parameters`.
    pub fn contained(&self) -> &[Resource] {
        match self {
            Resource::Medication(resource) => resource.contained(),
            Resource::MedicationKnowledge(resource) => resource.contained(),
            Resource::ObservationDefinition(resource) => resource.contained(),
            Resource::Substance(resource) => resource.contained(),
            Resource::Parameters(_) => &[],
        }
    }

    /// The concrete resource, e.g. `resource.get::<Medication>()`.
    pub fn get<T: Visitable>(&self) -> Option<&T> {
        self.as_visitable().downcast_ref::<T>()
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = JsonObject::deserialize(deserializer)?;
        Resource::from_json_object(object).map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl JsonField for Resource {
    fn write_json<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry(key, self)
    }

    fn write_json_list<M: SerializeMap>(values: &[Self], key: &str, map: &mut M) -> Result<(), M::Error> {
        serde_support::write_object_list(values, key, map)
    }

    fn read_json(key: &str, object: &mut JsonObject) -> Result<Option<Self>, serde_json::Error> {
        serde_support::read_object(key, object)
    }

    fn read_json_list(key: &str, object: &mut JsonObject) -> Result<Vec<Self>, serde_json::Error> {
        serde_support::read_object_list(key, object)
    }
}

/// Resources are validated when they are built.
impl ValidateField for Resource {}

impl Visitable for Resource {
    fn type_name(&self) -> &'static str {
        self.resource_type()
    }

    fn accept(&self, element_name: &str, element_index: Option<usize>, visitor: &mut dyn Visitor) {
        self.as_visitable().accept(element_name, element_index, visitor)
    }

    fn has_children(&self) -> bool {
        self.as_visitable().has_children()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self.as_visitable().as_any()
    }

    fn validate_node(&self) -> Result<(), ValidationError> {
        self.as_visitable().validate_node()
    }
}

/// dom-2: contained resources carry no contained resources of their own.
pub(crate) fn contained_are_flat(contained: &[Resource]) -> bool {
    contained.iter().all(|resource| resource.contained().is_empty())
}

/// dom-4: contained resources carry no `meta.versionId` or `meta.lastUpdated`.
pub(crate) fn contained_meta_is_local(contained: &[Resource]) -> bool {
    contained
        .iter()
        .filter_map(Resource::meta)
        .all(|meta| meta.version_id().is_none() && meta.last_updated().is_none())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn dispatches_on_resource_type() {
        let resource = Resource::from_json_object(object(json!({
            "resourceType": "Substance",
            "id": "s1",
            "instance": false,
            "code": {"concept": {"text": "lactose"}}
        })))
        .unwrap();
        assert_eq!(resource.resource_type(), "Substance");
        assert_eq!(resource.id(), Some("s1"));
        assert!(resource.get::<Substance>().is_some());
        assert!(resource.get::<Medication>().is_none());
    }

    #[test]
    fn unsupported_and_missing_types_fail() {
        let err = Resource::from_json_object(object(json!({"resourceType": "Patient"}))).unwrap_err();
        assert!(err.to_string().contains("Patient"));
        assert!(Resource::from_json_object(object(json!({"id": "x"}))).is_err());
        assert!(Resource::from_json_object(object(json!({"resourceType": 7}))).is_err());
    }

    #[test]
    fn serializes_as_the_inner_resource() {
        let medication = Medication::builder().id("m1").build().unwrap();
        let resource = Resource::from(medication);
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"resourceType": "Medication", "id": "m1"})
        );
        assert_eq!(resource.type_name(), "Medication");
    }
}
