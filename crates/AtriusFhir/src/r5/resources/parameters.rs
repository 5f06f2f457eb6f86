use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Code, DataType, Extension, Id, Meta, Resource, String, Uri};

/// FHIR Parameters resource
///
/// This resource is used to pass information into and back from an operation
/// (whether invoked directly from REST or within a messaging environment). It
/// is not persisted or allowed to be referenced by other resources.
///
/// Parameters is a plain Resource: no narrative, contained resources or
/// extensions at the top level.
///
/// See: [Parameters](http://hl7.org/fhir/StructureDefinition/Parameters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Parameters", kind = "resource")]
pub struct Parameters {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    /// Operation Parameter
    parameter: Vec<ParametersParameter>,
    hash_cache: HashCode,
}

impl Parameters {
    /// First top-level parameter called `name`.
    pub fn find_parameter(&self, name: &str) -> Option<&ParametersParameter> {
        self.parameter.iter().find(|parameter| parameter.has_name(name))
    }

    /// `value[x]` of the first top-level parameter called `name`.
    pub fn find_value(&self, name: &str) -> Option<&DataType> {
        self.find_parameter(name).and_then(ParametersParameter::value)
    }

    /// All top-level parameters called `name`, in order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParametersParameter> + 'a {
        self.parameter.iter().filter(move |parameter| parameter.has_name(name))
    }
}

/// FHIR Parameters.parameter backbone element
///
/// A parameter passed to or received from the operation.
///
/// ## Constraints
/// - inv-1: A parameter must have one and only one of (value, resource, part)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ParametersParameter", kind = "backbone")]
#[fhir_invariant(
    key = "inv-1",
    severity = "error",
    human = "A parameter must have one and only one of (value, resource, part)",
    expr = "(part.exists() and value.empty() and resource.empty()) or (part.empty() and (value.exists() xor resource.exists()))",
    path = "Parameters.parameter",
    rule = "one_of_value_resource_part"
)]
pub struct ParametersParameter {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Name from the definition
    #[fhir_element(required)]
    name: String,
    /// If parameter is a data type
    value: Option<DataType>,
    /// If parameter is a whole resource
    resource: Option<Box<Resource>>,
    /// Named part of a multi-part parameter
    part: Vec<ParametersParameter>,
    hash_cache: HashCode,
}

impl ParametersParameter {
    fn one_of_value_resource_part(&self) -> bool {
        if self.part.is_empty() {
            self.value.is_some() != self.resource.is_some()
        } else {
            self.value.is_none() && self.resource.is_none()
        }
    }

    fn has_name(&self, name: &str) -> bool {
        self.name.value.as_deref() == Some(name)
    }

    /// First part called `name`.
    pub fn find_part(&self, name: &str) -> Option<&ParametersParameter> {
        self.part.iter().find(|part| part.has_name(name))
    }
}
