#![allow(dead_code)]

use atrius_fhir_model::r5::*;
use atrius_fhir_model::PrecisionDateTime;
use rust_decimal_macros::dec;

pub fn loinc(code: &str, display: &str) -> CodeableConcept {
    let coding = Coding::builder()
        .system("http://loinc.org")
        .code(code)
        .display(display)
        .build()
        .unwrap();
    CodeableConcept::builder().coding(coding).build().unwrap()
}

pub fn substance_ref(id: &str) -> CodeableReference {
    CodeableReference::builder()
        .reference(Reference::to(&format!("Substance/{id}")).unwrap())
        .build()
        .unwrap()
}

pub fn mg_per_tablet(mg: rust_decimal::Decimal) -> Ratio {
    Ratio::builder()
        .numerator(Quantity::ucum(mg, "mg").unwrap())
        .denominator(Quantity::ucum(dec!(1), "{tablet}").unwrap())
        .build()
        .unwrap()
}

pub fn medication() -> Medication {
    Medication::builder()
        .id("med0310")
        .identifier(
            Identifier::builder()
                .system("http://example.org/medications")
                .value("12345")
                .build()
                .unwrap(),
        )
        .code(CodeableConcept::from_text("Amoxicillin 250mg / Clavulanate 62.5mg tablet").unwrap())
        .status(MedicationStatus::Active)
        .marketing_authorization_holder(Reference::to("Organization/mmanu").unwrap())
        .ingredient(
            MedicationIngredient::builder()
                .item(substance_ref("amoxicillin"))
                .is_active(true)
                .strength(mg_per_tablet(dec!(250)))
                .build()
                .unwrap(),
        )
        .ingredient(
            MedicationIngredient::builder()
                .item(substance_ref("clavulanate"))
                .is_active(true)
                .strength(mg_per_tablet(dec!(62.5)))
                .build()
                .unwrap(),
        )
        .batch(
            MedicationBatch::builder()
                .lot_number("9494788")
                .expiration_date(PrecisionDateTime::parse("2027-05-22").unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

pub fn medication_knowledge() -> MedicationKnowledge {
    MedicationKnowledge::builder()
        .id("mk1")
        .status(MedicationKnowledgeStatus::Active)
        .author(Reference::to("Organization/acme").unwrap())
        .name("Amoxicillin")
        .associated_medication(Reference::to("Medication/med0310").unwrap())
        .cost(
            MedicationKnowledgeCost::builder()
                .r#type(CodeableConcept::from_text("wholesale").unwrap())
                .cost(Money::builder().value(dec!(12.40)).currency("USD").build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

pub fn substance() -> Substance {
    Substance::builder()
        .id("amoxicillin")
        .instance(false)
        .status(SubstanceStatus::Active)
        .code(CodeableReference::builder().concept(CodeableConcept::from_text("amoxicillin").unwrap()).build().unwrap())
        .ingredient(
            SubstanceIngredient::builder()
                .substance(Reference::to("Substance/trihydrate").unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

pub fn observation_definition() -> ObservationDefinition {
    ObservationDefinition::builder()
        .id("glucose")
        .status(PublicationStatus::Active)
        .name("FastingGlucose")
        .code(loinc("15074-8", "Glucose [Moles/volume] in Blood"))
        .permitted_data_type(ObservationDataType::Quantity)
        .permitted_unit(Coding::from_system_code("http://unitsofmeasure.org", "mmol/L").unwrap())
        .qualified_value(
            ObservationDefinitionQualifiedValue::builder()
                .range_category(ObservationRangeCategory::Reference)
                .range(
                    Range::builder()
                        .low(Quantity::ucum(dec!(3.9), "mmol/L").unwrap())
                        .high(Quantity::ucum(dec!(6.1), "mmol/L").unwrap())
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

pub fn parameters() -> Parameters {
    Parameters::builder()
        .parameter(
            ParametersParameter::builder()
                .name("code")
                .value(Coding::from_system_code("http://loinc.org", "15074-8").unwrap())
                .build()
                .unwrap(),
        )
        .parameter(
            ParametersParameter::builder()
                .name("medication")
                .resource(medication())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}
