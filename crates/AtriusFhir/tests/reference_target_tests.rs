mod common;

use atrius_fhir_model::r5::*;
use atrius_fhir_model::ValidationError;
use atrius_model_support::check_reference_type;
use common::*;

fn holder(reference: Reference) -> Result<Medication, ValidationError> {
    Medication::builder().marketing_authorization_holder(reference).build()
}

#[test]
fn literal_reference_types_are_checked() {
    assert!(holder(Reference::to("Organization/acme").unwrap()).is_ok());
    assert!(holder(Reference::to("https://example.org/fhir/Organization/acme/_history/3").unwrap()).is_ok());
    assert!(holder(Reference::to("Organization?identifier=http://example.org|123").unwrap()).is_ok());

    let err = holder(Reference::to("Patient/p1").unwrap()).unwrap_err();
    match err {
        ValidationError::InvalidReferenceType { type_name, element, actual, allowed } => {
            assert_eq!(type_name, "Medication");
            assert_eq!(element, "marketingAuthorizationHolder");
            assert_eq!(actual, "Patient");
            assert_eq!(allowed, "Organization");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn references_without_a_type_are_accepted() {
    assert!(holder(Reference::to("#org1").unwrap()).is_ok());
    assert!(holder(Reference::to("urn:uuid:9d0a1a1e-5f6b-4c3e-9f51-6d2f6f3bc1a7").unwrap()).is_ok());
    let by_identifier = Reference::builder()
        .identifier(Identifier::builder().system("http://example.org/orgs").value("42").build().unwrap())
        .build()
        .unwrap();
    assert!(holder(by_identifier).is_ok());
}

#[test]
fn explicit_type_must_be_allowed_and_agree_with_the_literal() {
    let typed = |kind: &str, reference: &str| {
        Reference::builder().r#type(kind).reference(reference).build().unwrap()
    };
    assert!(holder(typed("Organization", "Organization/acme")).is_ok());
    assert!(matches!(
        holder(typed("Patient", "#p1")).unwrap_err(),
        ValidationError::InvalidReferenceType { .. }
    ));
    assert!(matches!(
        holder(typed("Organization", "Patient/p1")).unwrap_err(),
        ValidationError::InvalidReference { .. }
    ));
    assert!(matches!(
        holder(typed("NotAResource", "#x")).unwrap_err(),
        ValidationError::InvalidReference { .. }
    ));
}

#[test]
fn every_entry_of_a_reference_list_is_checked() {
    let err = MedicationKnowledge::builder()
        .associated_medication(Reference::to("Medication/m1").unwrap())
        .associated_medication(Reference::to("Substance/s1").unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("associatedMedication"));

    assert!(ObservationDefinition::builder()
        .status(PublicationStatus::Draft)
        .code(loinc("2345-7", "Glucose"))
        .device(Reference::to("Device/d1").unwrap())
        .device(Reference::to("DeviceDefinition/dd1").unwrap())
        .build()
        .is_ok());
}

#[test]
fn codeable_references_accept_what_the_element_allows() {
    assert!(MedicationIngredient::builder().item(substance_ref("s1")).build().is_ok());
    let medication_item = CodeableReference::builder()
        .reference(Reference::to("Medication/m2").unwrap())
        .build()
        .unwrap();
    assert!(MedicationIngredient::builder().item(medication_item).build().is_ok());

    let concept_only = CodeableReference::builder()
        .concept(CodeableConcept::from_text("lactose").unwrap())
        .build()
        .unwrap();
    assert!(MedicationIngredient::builder().item(concept_only).build().is_ok());

    // The item's target type is open.
    let organization = CodeableReference::builder()
        .reference(Reference::to("Organization/o1").unwrap())
        .build()
        .unwrap();
    assert!(MedicationIngredient::builder().item(organization).build().is_ok());
}

#[test]
fn codeable_references_in_a_union_are_checked() {
    let wrong = CodeableReference::builder()
        .reference(Reference::to("Organization/o1").unwrap())
        .build()
        .unwrap();
    let value = DataType::CodeableReference(Box::new(wrong));
    let err = check_reference_type(&value, "Parameters", "value", &["Substance"]).unwrap_err();
    match err {
        ValidationError::InvalidReferenceType { actual, .. } => assert_eq!(actual, "Organization"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn choice_references_are_checked_through_the_union() {
    let err = SubstanceIngredient::builder()
        .substance(Reference::to("Medication/m1").unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidReferenceType { element: "substance", .. }));
    assert!(SubstanceIngredient::builder()
        .substance(CodeableConcept::from_text("water").unwrap())
        .build()
        .is_ok());
}
