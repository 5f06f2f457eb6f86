use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Coding, Extension, String};

/// FHIR CodeableConcept type
///
/// A concept that may be defined by a formal reference to a terminology or
/// ontology or may be provided by text.
///
/// See: [CodeableConcept](http://hl7.org/fhir/StructureDefinition/CodeableConcept)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "CodeableConcept", kind = "complex")]
pub struct CodeableConcept {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Code defined by a terminology system
    coding: Vec<Coding>,
    /// Plain text representation of the concept
    text: Option<String>,
    hash_cache: HashCode,
}

impl CodeableConcept {
    /// A concept carrying only text.
    pub fn from_text(text: &str) -> Result<Self, atrius_model_support::ValidationError> {
        CodeableConcept::builder().text(text).build()
    }

    /// `true` when any coding matches `system` and `code`.
    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding.iter().any(|c| {
            c.system().and_then(|s| s.value.as_deref()) == Some(system)
                && c.code().and_then(|v| v.value.as_deref()) == Some(code)
        })
    }
}
