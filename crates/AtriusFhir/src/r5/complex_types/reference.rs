use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::{HashCode, ReferenceTarget};

use crate::r5::{Extension, Identifier, String, Uri};

/// FHIR Reference type
///
/// A reference from one resource to another.
///
/// ## Constraints
/// - ref-1: SHALL have a contained resource if a local reference is provided
/// - ref-2: At least one of reference, identifier and display SHALL be present (unless an extension is provided).
///
/// See: [Reference](http://hl7.org/fhir/StructureDefinition/Reference)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Reference", kind = "complex")]
#[fhir_invariant(
    key = "ref-1",
    severity = "error",
    human = "SHALL have a contained resource if a local reference is provided",
    expr = "reference.exists()  implies (reference.startsWith('#').not() or (reference.substring(1).trace('url') in %rootResource.contained.id.trace('ids')) or (reference='#' and %rootResource!=%resource))",
    path = "Reference"
)]
#[fhir_invariant(
    key = "ref-2",
    severity = "error",
    human = "At least one of reference, identifier and display SHALL be present (unless an extension is provided).",
    expr = "reference.exists() or identifier.exists() or display.exists() or extension.exists()",
    path = "Reference",
    rule = "has_target"
)]
pub struct Reference {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Literal reference, Relative, internal or absolute URL
    reference: Option<String>,
    /// Type the reference refers to (e.g. "Patient") - must be a resource in resources
    #[fhir_serde(rename = "type")]
    r#type: Option<Uri>,
    /// Logical reference, when literal reference is not known
    identifier: Option<Identifier>,
    /// Text alternative for the resource
    display: Option<String>,
    hash_cache: HashCode,
}

impl Reference {
    fn has_target(&self) -> bool {
        self.reference.is_some() || self.identifier.is_some() || self.display.is_some() || !self.extension.is_empty()
    }

    /// A literal reference such as `"Organization/acme"`.
    pub fn to(reference: &str) -> Result<Self, atrius_model_support::ValidationError> {
        Reference::builder().reference(reference).build()
    }
}

impl ReferenceTarget for Reference {
    fn reference_parts(&self) -> Option<(Option<&str>, Option<&str>)> {
        Some((
            self.r#type.as_ref().and_then(|t| t.value.as_deref()),
            self.reference.as_ref().and_then(|r| r.value.as_deref()),
        ))
    }
}
