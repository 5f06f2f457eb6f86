use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{DataType, DateTime, Extension, Markdown};

/// FHIR Annotation type
///
/// A  text note which also  contains information about who made the statement
/// and when.
///
/// See: [Annotation](http://hl7.org/fhir/StructureDefinition/Annotation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Annotation", kind = "complex")]
pub struct Annotation {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Individual responsible for the annotation
    #[fhir_element(
        choice = "Reference|String",
        reference = "Practitioner|PractitionerRole|Patient|RelatedPerson|Organization"
    )]
    author: Option<DataType>,
    /// When the annotation was made
    time: Option<DateTime>,
    /// The annotation  - text content (as markdown)
    #[fhir_element(required)]
    text: Markdown,
    hash_cache: HashCode,
}
