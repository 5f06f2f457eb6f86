//! Code systems bound with `required` strength, carried as
//! `Element<Enum, Extension>` so the `_field` companion still works.

use std::fmt;

use atrius_model_support::PrimitiveValue;
use serde::{Deserialize, Serialize};

use crate::primitive::PrimitiveKind;

macro_rules! code_system {
    (
        $(#[$meta:meta])*
        $name:ident = $system:literal {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[doc = concat!("Canonical URL: ", $system)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn system() -> &'static str {
                $system
            }
        }

        impl TryFrom<&str> for $name {
            type Error = String;

            fn try_from(code: &str) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(format!(concat!("unknown ", stringify!($name), " code '{}'"), other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_code())
            }
        }

        impl PrimitiveKind for $name {
            const FHIR_TYPE: &'static str = "code";

            fn primitive_value(&self) -> PrimitiveValue<'_> {
                PrimitiveValue::Text(self.as_code())
            }
        }
    };
}

code_system! {
    /// FHIR CodeSystem: PublicationStatus
    PublicationStatus = "http://hl7.org/fhir/publication-status" {
        Draft => "draft",
        Active => "active",
        Retired => "retired",
        Unknown => "unknown",
    }
}

/// `RelatedArtifact.publicationStatus` is bound to the same code system.
pub type RelatedArtifactPublicationStatus = PublicationStatus;

code_system! {
    /// FHIR CodeSystem: MedicationStatus
    MedicationStatus = "http://hl7.org/fhir/CodeSystem/medication-status" {
        Active => "active",
        Inactive => "inactive",
        EnteredInError => "entered-in-error",
    }
}

code_system! {
    /// FHIR CodeSystem: MedicationKnowledgeStatus
    MedicationKnowledgeStatus = "http://hl7.org/fhir/CodeSystem/medicationknowledge-status" {
        Active => "active",
        EnteredInError => "entered-in-error",
        Inactive => "inactive",
    }
}

code_system! {
    /// FHIR CodeSystem: SubstanceStatus
    SubstanceStatus = "http://hl7.org/fhir/substance-status" {
        Active => "active",
        Inactive => "inactive",
        EnteredInError => "entered-in-error",
    }
}

code_system! {
    /// FHIR CodeSystem: ObservationDataType
    ///
    /// Permitted data type for observation value.
    ObservationDataType = "http://hl7.org/fhir/permitted-data-type" {
        Quantity => "Quantity",
        CodeableConcept => "CodeableConcept",
        String => "string",
        Boolean => "boolean",
        Integer => "integer",
        Range => "Range",
        Ratio => "Ratio",
        SampledData => "SampledData",
        Time => "time",
        DateTime => "dateTime",
        Period => "Period",
    }
}

code_system! {
    /// FHIR CodeSystem: ObservationRangeCategory
    ObservationRangeCategory = "http://hl7.org/fhir/observation-range-category" {
        Reference => "reference",
        Critical => "critical",
        Absolute => "absolute",
    }
}

code_system! {
    /// FHIR CodeSystem: AdministrativeGender
    AdministrativeGender = "http://hl7.org/fhir/administrative-gender" {
        Male => "male",
        Female => "female",
        Other => "other",
        Unknown => "unknown",
    }
}

code_system! {
    /// FHIR CodeSystem: NarrativeStatus
    NarrativeStatus = "http://hl7.org/fhir/narrative-status" {
        /// Display: Generated
        Generated => "generated",
        /// Display: Extensions
        Extensions => "extensions",
        /// Display: Additional
        Additional => "additional",
        /// Display: Empty
        Empty => "empty",
    }
}

code_system! {
    /// FHIR CodeSystem: QuantityComparator
    QuantityComparator = "http://hl7.org/fhir/quantity-comparator" {
        LessThan => "<",
        LessOrEqual => "<=",
        GreaterOrEqual => ">=",
        GreaterThan => ">",
        /// Definition: The actual value is sufficient for the total quantity to equal the given value.
        Ad => "ad",
    }
}

code_system! {
    /// FHIR CodeSystem: IdentifierUse
    IdentifierUse = "http://hl7.org/fhir/identifier-use" {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Secondary => "secondary",
        Old => "old",
    }
}

code_system! {
    /// FHIR CodeSystem: ContactPointSystem
    ContactPointSystem = "http://hl7.org/fhir/contact-point-system" {
        Phone => "phone",
        Fax => "fax",
        Email => "email",
        Pager => "pager",
        Url => "url",
        Sms => "sms",
        Other => "other",
    }
}

code_system! {
    /// FHIR CodeSystem: ContactPointUse
    ContactPointUse = "http://hl7.org/fhir/contact-point-use" {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Mobile => "mobile",
    }
}

code_system! {
    /// FHIR CodeSystem: NameUse
    NameUse = "http://hl7.org/fhir/name-use" {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Nickname => "nickname",
        Anonymous => "anonymous",
        Old => "old",
        Maiden => "maiden",
    }
}

code_system! {
    /// FHIR CodeSystem: AddressUse
    AddressUse = "http://hl7.org/fhir/address-use" {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Billing => "billing",
    }
}

code_system! {
    /// FHIR CodeSystem: AddressType
    AddressType = "http://hl7.org/fhir/address-type" {
        Postal => "postal",
        Physical => "physical",
        Both => "both",
    }
}

code_system! {
    /// FHIR CodeSystem: RelatedArtifactType
    RelatedArtifactType = "http://hl7.org/fhir/related-artifact-type" {
        Documentation => "documentation",
        Justification => "justification",
        Citation => "citation",
        Predecessor => "predecessor",
        Successor => "successor",
        DerivedFrom => "derived-from",
        DependsOn => "depends-on",
        ComposedOf => "composed-of",
        PartOf => "part-of",
        Amends => "amends",
        AmendedWith => "amended-with",
        Appends => "appends",
        AppendedWith => "appended-with",
        Cites => "cites",
        CitedBy => "cited-by",
        CommentsOn => "comments-on",
        CommentIn => "comment-in",
        Contains => "contains",
        ContainedIn => "contained-in",
        Corrects => "corrects",
        CorrectionIn => "correction-in",
        Replaces => "replaces",
        ReplacedWith => "replaced-with",
        Retracts => "retracts",
        RetractedBy => "retracted-by",
        Signs => "signs",
        SimilarTo => "similar-to",
        Supports => "supports",
        SupportedWith => "supported-with",
        Transforms => "transforms",
        TransformedInto => "transformed-into",
        TransformedWith => "transformed-with",
        Documents => "documents",
        SpecificationOf => "specification-of",
        CreatedWith => "created-with",
        CiteAs => "cite-as",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_json() {
        let json = serde_json::to_string(&MedicationStatus::EnteredInError).unwrap();
        assert_eq!(json, "\"entered-in-error\"");
        let back: MedicationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MedicationStatus::EnteredInError);
        assert!(serde_json::from_str::<MedicationStatus>("\"retired\"").is_err());
    }

    #[test]
    fn comparator_symbols() {
        assert_eq!(QuantityComparator::try_from("<="), Ok(QuantityComparator::LessOrEqual));
        assert_eq!(QuantityComparator::GreaterThan.to_string(), ">");
        assert!(AdministrativeGender::try_from("m").is_err());
    }

    #[test]
    fn codes_are_code_primitives() {
        assert_eq!(<ObservationDataType as PrimitiveKind>::FHIR_TYPE, "code");
        assert_eq!(ObservationDataType::DateTime.primitive_value(), PrimitiveValue::Text("dateTime"));
        assert_eq!(PublicationStatus::system(), "http://hl7.org/fhir/publication-status");
    }
}
