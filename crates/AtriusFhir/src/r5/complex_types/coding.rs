use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::{Boolean, Code, Extension, String, Uri};

/// FHIR Coding type
///
/// A reference to a code defined by a terminology system.
///
/// ## Constraints
/// - cod-1: A Coding SHOULD NOT have a display unless a code is also present (warning)
///
/// See: [Coding](http://hl7.org/fhir/StructureDefinition/Coding)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Coding", kind = "complex")]
#[fhir_invariant(
    key = "cod-1",
    severity = "warning",
    human = "A Coding SHOULD NOT have a display unless a code is also present.  Computable consumers SHALL ONLY use the display for human display",
    expr = "code.exists().not() implies display.exists().not()",
    path = "Coding",
    rule = "display_needs_code"
)]
pub struct Coding {
    /// Unique id for inter-element referencing
    id: Option<std::string::String>,
    /// Additional content defined by implementations
    extension: Vec<Extension>,
    /// Identity of the terminology system
    system: Option<Uri>,
    /// Version of the system - if relevant
    version: Option<String>,
    /// Symbol in syntax defined by the system
    code: Option<Code>,
    /// Representation defined by the system
    display: Option<String>,
    /// If this coding was chosen directly by the user
    user_selected: Option<Boolean>,
    hash_cache: HashCode,
}

impl Coding {
    fn display_needs_code(&self) -> bool {
        self.code.is_some() || self.display.is_none()
    }

    /// Shorthand for a coding with a system and code.
    pub fn from_system_code(system: &str, code: &str) -> Result<Self, atrius_model_support::ValidationError> {
        Coding::builder().system(system).code(code).build()
    }
}
