use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{
    Attachment, Canonical, CodeableConcept, Date, Extension, Markdown, Reference, RelatedArtifactPublicationStatus,
    RelatedArtifactType, String,
};

/// FHIR RelatedArtifact type
///
/// Related artifacts such as additional documentation, justification, or
/// bibliographic references.
///
/// See: [RelatedArtifact](http://hl7.org/fhir/StructureDefinition/RelatedArtifact)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "RelatedArtifact", kind = "complex")]
pub struct RelatedArtifact {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// documentation | justification | citation | predecessor | successor | derived-from | depends-on | composed-of | part-of | amends | amended-with | appends | appended-with | cites | cited-by | comments-on | comment-in | contains | contained-in | corrects | correction-in | replaces | replaced-with | retracts | retracted-by | signs | similar-to | supports | supported-with | transforms | transformed-into | transformed-with | documents | specification-of | created-with | cite-as
    #[fhir_serde(rename = "type")]
    #[fhir_element(required)]
    r#type: Element<RelatedArtifactType, Extension>,
    /// Additional classifiers
    classifier: Vec<CodeableConcept>,
    /// Short label
    label: Option<String>,
    /// Brief description of the related artifact
    display: Option<String>,
    /// Bibliographic citation for the artifact
    citation: Option<Markdown>,
    /// What document is being referenced
    document: Option<Attachment>,
    /// What artifact is being referenced
    resource: Option<Canonical>,
    /// What artifact, if not a conformance resource
    resource_reference: Option<Reference>,
    /// draft | active | retired | unknown
    publication_status: Option<Element<RelatedArtifactPublicationStatus, Extension>>,
    /// Date of publication of the artifact being referred to
    publication_date: Option<Date>,
    hash_cache: HashCode,
}
