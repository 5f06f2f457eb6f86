use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Base64Binary, Code, DateTime, Decimal, Extension, Integer64, PositiveInt, String, Url};

/// FHIR Attachment type
///
/// For referring to data content defined in other formats.
///
/// ## Constraints
/// - att-1: If the Attachment has data, it SHALL have a contentType
///
/// See: [Attachment](http://hl7.org/fhir/StructureDefinition/Attachment)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Attachment", kind = "complex")]
#[fhir_invariant(
    key = "att-1",
    severity = "error",
    human = "If the Attachment has data, it SHALL have a contentType",
    expr = "data.empty() or contentType.exists()",
    path = "Attachment",
    rule = "data_has_content_type"
)]
pub struct Attachment {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    /// Mime type of the content, with charset etc.
    content_type: Option<Code>,
    /// Human language of the content (BCP-47)
    language: Option<Code>,
    /// Data inline, base64ed
    data: Option<Base64Binary>,
    /// Uri where the data can be found
    url: Option<Url>,
    /// Number of bytes of content (if url provided)
    size: Option<Integer64>,
    /// Hash of the data (sha-1, base64ed)
    hash: Option<Base64Binary>,
    /// Label to display in place of the data
    title: Option<String>,
    /// Date attachment was first created
    creation: Option<DateTime>,
    /// Height of the image in pixels (photo/video)
    height: Option<PositiveInt>,
    /// Width of the image in pixels (photo/video)
    width: Option<PositiveInt>,
    /// Number of frames if > 1 (photo)
    frames: Option<PositiveInt>,
    /// Length in seconds (audio / video)
    duration: Option<Decimal>,
    /// Number of printed pages
    pages: Option<PositiveInt>,
    hash_cache: HashCode,
}

impl Attachment {
    fn data_has_content_type(&self) -> bool {
        self.data.is_none() || self.content_type.is_some()
    }
}
