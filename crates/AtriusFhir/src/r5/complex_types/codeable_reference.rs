use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::{HashCode, ReferenceTarget};

use crate::r5::{CodeableConcept, Extension, Reference};

/// FHIR CodeableReference type
///
/// A reference to a resource (by instance), or instead, a reference to a
/// concept defined in a terminology or ontology (by class).
///
/// See: [CodeableReference](http://hl7.org/fhir/StructureDefinition/CodeableReference)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "CodeableReference", kind = "complex")]
pub struct CodeableReference {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Reference to a concept (by class)
    concept: Option<CodeableConcept>,
    /// Reference to a resource (by instance)
    reference: Option<Reference>,
    hash_cache: HashCode,
}

/// Only the `reference` half is subject to target type checks.
impl ReferenceTarget for CodeableReference {
    fn reference_parts(&self) -> Option<(Option<&str>, Option<&str>)> {
        self.reference.as_ref().and_then(ReferenceTarget::reference_parts)
    }
}
