use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;

use crate::r5::DataType;

/// FHIR Extension type
///
/// Optional Extension Element - found in all resources.
///
/// ## Constraints
/// - ext-1: Must have either extensions or value[x], not both
///
/// See: [Extension](http://hl7.org/fhir/StructureDefinition/Extension)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "Extension", kind = "complex")]
#[fhir_invariant(
    key = "ext-1",
    severity = "error",
    human = "Must have either extensions or value[x], not both",
    expr = "extension.exists() != value.exists()",
    path = "Extension",
    rule = "extensions_or_value"
)]
pub struct Extension {
    /// Unique id for inter-element referencing
    id: Option<String>,
    /// Additional content defined by implementations
    extension: Vec<Extension>,
    /// identifies the meaning of the extension
    #[fhir_element(required)]
    url: String,
    /// Value of extension
    value: Option<DataType>,
    hash_cache: HashCode,
}

impl Extension {
    fn extensions_or_value(&self) -> bool {
        self.extension.is_empty() != self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r5::{Code, Coding};

    #[test]
    fn value_or_nested_extensions_but_not_both() {
        let url = "http://example.org/fhir/StructureDefinition/flag";
        let nested = Extension::builder().url("inner").value(DataType::Boolean(true.into())).build().unwrap();

        assert!(Extension::builder().url(url).value(DataType::Code(Code::from("x"))).build().is_ok());
        assert!(Extension::builder().url(url).extension(nested.clone()).build().is_ok());

        let both = Extension::builder()
            .url(url)
            .extension(nested)
            .value(Coding::builder().code("x").build().unwrap())
            .build();
        assert!(matches!(
            both,
            Err(atrius_model_support::ValidationError::ConstraintViolated { key: "ext-1", .. })
        ));
        assert!(Extension::builder().url(url).build().is_err());
    }

    #[test]
    fn url_is_required() {
        let err = Extension::builder()
            .value(DataType::Boolean(false.into()))
            .build()
            .unwrap_err();
        assert_eq!(err.element(), Some("url"));
    }
}
