use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::element::Element;
use crate::r5::{Extension, NarrativeStatus, Xhtml};

/// FHIR Narrative type
///
/// A human-readable summary of the resource conveying the essential clinical
/// and business information for the resource.
///
/// ## Constraints
/// - txt-1: The narrative SHALL contain only the basic html formatting elements and attributes
/// - txt-2: The narrative SHALL have some non-whitespace content
///
/// See: [Narrative](http://hl7.org/fhir/StructureDefinition/Narrative)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Narrative", kind = "complex")]
#[fhir_invariant(
    key = "txt-1",
    severity = "error",
    human = "The narrative SHALL contain only the basic html formatting elements and attributes described in chapters 7-11 (except section 4 of chapter 9) and 15 of the HTML 4.0 standard, <a> elements (either name or href), images and internally contained style attributes",
    expr = "htmlChecks()",
    path = "Narrative.div"
)]
#[fhir_invariant(
    key = "txt-2",
    severity = "error",
    human = "The narrative SHALL have some non-whitespace content",
    expr = "htmlChecks()",
    path = "Narrative.div",
    rule = "has_content"
)]
pub struct Narrative {
    id: Option<String>,
    extension: Vec<Extension>,
    /// generated | extensions | additional | empty
    #[fhir_element(required)]
    status: Element<NarrativeStatus, Extension>,
    /// Limited xhtml content
    #[fhir_element(required)]
    div: Xhtml,
    hash_cache: HashCode,
}

impl Narrative {
    /// Text outside of tags, or an image, counts as content.
    fn has_content(&self) -> bool {
        let Some(div) = self.div.value.as_deref() else {
            return !self.div.extension.is_empty();
        };
        if div.contains("<img") {
            return true;
        }
        let mut in_tag = false;
        div.chars().any(|c| match c {
            '<' => {
                in_tag = true;
                false
            }
            '>' => {
                in_tag = false;
                false
            }
            c => !in_tag && !c.is_whitespace(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrative(div: &str) -> Result<Narrative, atrius_model_support::ValidationError> {
        Narrative::builder()
            .status(NarrativeStatus::Generated)
            .div(div)
            .build()
    }

    #[test]
    fn div_needs_text() {
        assert!(narrative(r#"<div xmlns="http://www.w3.org/1999/xhtml">Aspirin 75mg</div>"#).is_ok());
        assert!(narrative(r#"<div xmlns="http://www.w3.org/1999/xhtml"><img src="x.png"/></div>"#).is_ok());
        assert!(narrative(r#"<div xmlns="http://www.w3.org/1999/xhtml">   </div>"#).is_err());
    }
}
