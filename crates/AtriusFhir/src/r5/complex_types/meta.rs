use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Canonical, Coding, Extension, Id, Instant, Uri};

/// FHIR Meta type
///
/// The metadata about a resource. This is content in the resource that is
/// maintained by the infrastructure. Changes to the content might not always
/// be associated with version changes to the resource.
///
/// See: [Meta](http://hl7.org/fhir/StructureDefinition/Meta)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Meta", kind = "complex")]
pub struct Meta {
    id: Option<String>,
    extension: Vec<Extension>,
    /// Version specific identifier
    version_id: Option<Id>,
    /// When the resource version last changed
    last_updated: Option<Instant>,
    /// Identifies where the resource comes from
    source: Option<Uri>,
    /// Profiles this resource claims to conform to
    profile: Vec<Canonical>,
    /// Security Labels applied to this resource
    security: Vec<Coding>,
    /// Tags applied to this resource
    tag: Vec<Coding>,
    hash_cache: HashCode,
}
