use atrius_macros::{FhirModel, FhirSerde};
use atrius_model_support::HashCode;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::Element;
use crate::r5::resource::{contained_are_flat, contained_meta_is_local};
use crate::r5::{
    AdministrativeGender, Boolean, Canonical, Code, CodeableConcept, Coding, ContactDetail, DataType, Date, DateTime,
    Extension, Id, Identifier, Markdown, Meta, Narrative, ObservationDataType, ObservationRangeCategory, Period,
    PublicationStatus, Range, Reference, Resource, String, Uri, UsageContext,
};

static COMPUTABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]([A-Za-z0-9_]){1,254}$").expect("valid computable name regex"));

type DataTypeCode = Element<ObservationDataType, Extension>;

/// obd-0 and obd-1 share one rule.
fn units_imply_quantity(permitted_unit: &[Coding], permitted_data_type: &[DataTypeCode]) -> bool {
    permitted_unit.is_empty()
        || permitted_data_type
            .iter()
            .any(|data_type| data_type.value == Some(ObservationDataType::Quantity))
}

/// FHIR ObservationDefinition resource
///
/// Set of definitional characteristics for a kind of observation or
/// measurement produced or consumed by an orderable health care service.
///
/// ## Constraints
/// - cnl-0: Name should be usable as an identifier for the module by machine processing applications such as code generation
/// - obd-0: If permittedUnit exists, then permittedDataType=Quantity must exist.
/// - dom-2: If the resource is contained in another resource, it SHALL NOT contain nested Resources
/// - dom-4: If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated
///
/// See: [ObservationDefinition](http://hl7.org/fhir/StructureDefinition/ObservationDefinition)
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ObservationDefinition", kind = "resource")]
#[fhir_invariant(
    key = "cnl-0",
    severity = "warning",
    human = "Name should be usable as an identifier for the module by machine processing applications such as code generation",
    expr = "name.exists() implies name.matches('^[A-Z]([A-Za-z0-9_]){1,254}$')",
    path = "ObservationDefinition",
    rule = "computable_name"
)]
#[fhir_invariant(
    key = "obd-0",
    severity = "error",
    human = "If permittedUnit exists, then permittedDataType=Quantity must exist.",
    expr = "permittedUnit.exists() implies (permittedDataType = 'Quantity').exists()",
    path = "ObservationDefinition",
    rule = "permitted_unit_needs_quantity"
)]
#[fhir_invariant(
    key = "dom-2",
    severity = "error",
    human = "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
    expr = "contained.contained.empty()",
    path = "ObservationDefinition",
    rule = "contained_flat"
)]
#[fhir_invariant(
    key = "dom-4",
    severity = "error",
    human = "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
    expr = "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
    path = "ObservationDefinition",
    rule = "contained_meta_local"
)]
pub struct ObservationDefinition {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Logical canonical URL to reference this ObservationDefinition (globally unique)
    url: Option<Uri>,
    /// Business identifier of the ObservationDefinition
    identifier: Option<Identifier>,
    /// Business version of the ObservationDefinition
    version: Option<String>,
    /// How to compare versions
    #[fhir_element(choice = "String|Coding")]
    version_algorithm: Option<DataType>,
    /// Name for this ObservationDefinition (computer friendly)
    name: Option<String>,
    /// Name for this ObservationDefinition (human friendly)
    title: Option<String>,
    /// draft | active | retired | unknown
    #[fhir_element(required)]
    status: Element<PublicationStatus, Extension>,
    /// If for testing purposes, not real usage
    experimental: Option<Boolean>,
    /// Date last changed
    date: Option<DateTime>,
    /// The name of the individual or organization that published the ObservationDefinition
    publisher: Option<String>,
    /// Contact details for the publisher
    contact: Vec<ContactDetail>,
    /// Natural language description of the ObservationDefinition
    description: Option<Markdown>,
    /// Content intends to support these contexts
    use_context: Vec<UsageContext>,
    /// Intended jurisdiction for this ObservationDefinition (if applicable)
    jurisdiction: Vec<CodeableConcept>,
    /// Why this ObservationDefinition is defined
    purpose: Option<Markdown>,
    /// Use and/or publishing restrictions
    copyright: Option<Markdown>,
    /// Copyright holder and year(s)
    copyright_label: Option<String>,
    /// When ObservationDefinition was approved by publisher
    approval_date: Option<Date>,
    /// Date on which the asset content was last reviewed by the publisher
    last_review_date: Option<Date>,
    /// The effective date range for the ObservationDefinition
    effective_period: Option<Period>,
    /// Based on FHIR definition of another observation
    derived_from_canonical: Vec<Canonical>,
    /// Based on external definition
    derived_from_uri: Vec<Uri>,
    /// Type of subject for the defined observation
    subject: Vec<CodeableConcept>,
    /// Desired kind of performer for such kind of observation
    performer_type: Option<CodeableConcept>,
    /// General type of observation
    category: Vec<CodeableConcept>,
    /// Type of observation
    #[fhir_element(required)]
    code: CodeableConcept,
    /// Quantity | CodeableConcept | string | boolean | integer | Range | Ratio | SampledData | time | dateTime | Period
    permitted_data_type: Vec<DataTypeCode>,
    /// Multiple results allowed for conforming observations
    multiple_results_allowed: Option<Boolean>,
    /// Body part to be observed
    body_site: Option<CodeableConcept>,
    /// Method used to produce the observation
    method: Option<CodeableConcept>,
    /// Kind of specimen used by this type of observation
    #[fhir_element(reference = "SpecimenDefinition")]
    specimen: Vec<Reference>,
    /// Measurement device or model of device
    #[fhir_element(reference = "DeviceDefinition|Device")]
    device: Vec<Reference>,
    /// The preferred name to be used when reporting the observation results
    preferred_report_name: Option<String>,
    /// Unit for quantitative results
    permitted_unit: Vec<Coding>,
    /// Set of qualified values for observation results
    qualified_value: Vec<ObservationDefinitionQualifiedValue>,
    /// Definitions of related resources belonging to this kind of observation group
    #[fhir_element(reference = "ObservationDefinition|Questionnaire")]
    has_member: Vec<Reference>,
    /// Component results
    component: Vec<ObservationDefinitionComponent>,
    hash_cache: HashCode,
}

impl ObservationDefinition {
    fn computable_name(&self) -> bool {
        self.name
            .as_ref()
            .and_then(|name| name.value.as_deref())
            .is_none_or(|name| COMPUTABLE_NAME.is_match(name))
    }

    fn permitted_unit_needs_quantity(&self) -> bool {
        units_imply_quantity(&self.permitted_unit, &self.permitted_data_type)
    }

    fn contained_flat(&self) -> bool {
        contained_are_flat(&self.contained)
    }

    fn contained_meta_local(&self) -> bool {
        contained_meta_is_local(&self.contained)
    }

    /// `true` if results may be reported as `data_type`.
    pub fn permits(&self, data_type: ObservationDataType) -> bool {
        self.permitted_data_type.iter().any(|permitted| permitted.value == Some(data_type))
    }

    /// Qualified values in the given range category (e.g. reference ranges).
    pub fn qualified_values_in(
        &self,
        category: ObservationRangeCategory,
    ) -> impl Iterator<Item = &ObservationDefinitionQualifiedValue> {
        self.qualified_value
            .iter()
            .filter(move |value| value.range_category.as_ref().and_then(|c| c.value) == Some(category))
    }
}

/// FHIR ObservationDefinition.qualifiedValue backbone element
///
/// A set of qualified values associated with a context and a set of
/// conditions - provides a range for quantitative and ordinal observations
/// and a collection of value sets for qualitative observations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ObservationDefinitionQualifiedValue", kind = "backbone")]
pub struct ObservationDefinitionQualifiedValue {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Context qualifier for the set of qualified values
    context: Option<CodeableConcept>,
    /// Targetted population for the set of qualified values
    applies_to: Vec<CodeableConcept>,
    /// male | female | other | unknown
    gender: Option<Element<AdministrativeGender, Extension>>,
    /// Applicable age range for the set of qualified values
    age: Option<Range>,
    /// Applicable gestational age range for the set of qualified values
    gestational_age: Option<Range>,
    /// Condition associated with the set of qualified values
    condition: Option<String>,
    /// reference | critical | absolute
    range_category: Option<Element<ObservationRangeCategory, Extension>>,
    /// The range for continuous or ordinal observations
    range: Option<Range>,
    /// Value set of valid coded values as part of this set of qualified values
    valid_coded_value_set: Option<Canonical>,
    /// Value set of normal coded values as part of this set of qualified values
    normal_coded_value_set: Option<Canonical>,
    /// Value set of abnormal coded values as part of this set of qualified values
    abnormal_coded_value_set: Option<Canonical>,
    /// Value set of critical coded values as part of this set of qualified values
    critical_coded_value_set: Option<Canonical>,
    hash_cache: HashCode,
}

/// FHIR ObservationDefinition.component backbone element
///
/// Some observations have multiple component observations, expressed as
/// separate code value pairs.
///
/// ## Constraints
/// - obd-1: If permittedUnit exists, then permittedDataType=Quantity must exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
#[fhir_type(name = "ObservationDefinitionComponent", kind = "backbone")]
#[fhir_invariant(
    key = "obd-1",
    severity = "error",
    human = "If permittedUnit exists, then permittedDataType=Quantity must exist.",
    expr = "permittedUnit.exists() implies (permittedDataType = 'Quantity').exists()",
    path = "ObservationDefinition.component",
    rule = "permitted_unit_needs_quantity"
)]
pub struct ObservationDefinitionComponent {
    id: Option<std::string::String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    /// Type of observation
    #[fhir_element(required)]
    code: CodeableConcept,
    /// Quantity | CodeableConcept | string | boolean | integer | Range | Ratio | SampledData | time | dateTime | Period
    permitted_data_type: Vec<DataTypeCode>,
    /// Unit for quantitative results
    permitted_unit: Vec<Coding>,
    /// Set of qualified values for observation results
    qualified_value: Vec<ObservationDefinitionQualifiedValue>,
    hash_cache: HashCode,
}

impl ObservationDefinitionComponent {
    fn permitted_unit_needs_quantity(&self) -> bool {
        units_imply_quantity(&self.permitted_unit, &self.permitted_data_type)
    }
}
