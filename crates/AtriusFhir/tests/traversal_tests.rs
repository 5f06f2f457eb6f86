mod common;

use atrius_fhir_model::r5::*;
use atrius_fhir_model::visitor::{validate_tree, PathCollector, TypeCollector};
use atrius_fhir_model::{Visitable, Visitor};
use common::*;

/// Records every callback as a line of text.
#[derive(Default)]
struct Recorder {
    events: Vec<std::string::String>,
    skip_type: Option<&'static str>,
    stop_descent_at: Option<&'static str>,
}

impl Visitor for Recorder {
    fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
        self.skip_type != Some(node.type_name())
    }

    fn visit_start(&mut self, element_name: &str, element_index: Option<usize>, _node: &dyn Visitable) {
        match element_index {
            Some(index) => self.events.push(format!("start {element_name}[{index}]")),
            None => self.events.push(format!("start {element_name}")),
        }
    }

    fn visit(&mut self, element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) -> bool {
        self.stop_descent_at != Some(element_name)
    }

    fn visit_end(&mut self, element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) {
        self.events.push(format!("end {element_name}"));
    }

    fn visit_list_start(&mut self, element_name: &str, len: usize) {
        self.events.push(format!("list {element_name} {len}"));
    }

    fn visit_list_end(&mut self, element_name: &str, len: usize) {
        self.events.push(format!("/list {element_name} {len}"));
    }
}

fn small_medication() -> Medication {
    Medication::builder()
        .status(MedicationStatus::Active)
        .ingredient(MedicationIngredient::builder().item(substance_ref("a")).build().unwrap())
        .ingredient(MedicationIngredient::builder().item(substance_ref("b")).build().unwrap())
        .build()
        .unwrap()
}

#[test]
fn callbacks_nest_in_declaration_order() {
    let mut recorder = Recorder::default();
    small_medication().walk(&mut recorder);
    let events: Vec<&str> = recorder.events.iter().map(|e| e.as_str()).collect();
    assert_eq!(
        events,
        [
            "start Medication",
            "start status",
            "end status",
            "list ingredient 2",
            "start ingredient[0]",
            "start item",
            "start reference",
            "start reference",
            "end reference",
            "end reference",
            "end item",
            "end ingredient",
            "start ingredient[1]",
            "start item",
            "start reference",
            "start reference",
            "end reference",
            "end reference",
            "end item",
            "end ingredient",
            "/list ingredient 2",
            "end Medication",
        ]
    );
}

#[test]
fn visit_returning_false_keeps_the_node_but_skips_children() {
    let mut recorder = Recorder {
        stop_descent_at: Some("item"),
        ..Recorder::default()
    };
    small_medication().walk(&mut recorder);
    assert!(recorder.events.contains(&"start item".to_string()));
    assert!(recorder.events.contains(&"end item".to_string()));
    assert!(!recorder.events.iter().any(|e| e.starts_with("start reference")));
}

#[test]
fn pre_visit_returning_false_skips_the_node() {
    let mut recorder = Recorder {
        skip_type: Some("CodeableReference"),
        ..Recorder::default()
    };
    small_medication().walk(&mut recorder);
    assert!(!recorder.events.iter().any(|e| e.contains("item")));
    assert!(recorder.events.contains(&"start ingredient[1]".to_string()));
}

#[test]
fn choice_values_are_visited_under_the_element_name() {
    let mut paths = PathCollector::new();
    medication().walk(&mut paths);
    assert!(paths.contains("Medication.ingredient[1].strength.numerator.value"));
    let strength = paths
        .paths()
        .iter()
        .find(|(path, _)| path == "Medication.ingredient[0].strength")
        .map(|(_, type_name)| *type_name);
    assert_eq!(strength, Some("Ratio"));
}

#[test]
fn nested_resources_are_walked() {
    let mut paths = PathCollector::new();
    parameters().walk(&mut paths);
    assert!(paths.contains("Parameters.parameter[0].value.code"));
    assert!(paths.contains("Parameters.parameter[1].resource.ingredient[0].item"));

    let mut medications = TypeCollector::<Medication>::new();
    parameters().walk(&mut medications);
    assert_eq!(medications.found(), &[medication()]);
}

#[test]
fn contained_resources_are_walked() {
    let medication = Medication::builder()
        .contained(substance())
        .ingredient(MedicationIngredient::builder().item(substance_ref("amoxicillin")).build().unwrap())
        .build()
        .unwrap();
    let mut substances = TypeCollector::<Substance>::new();
    medication.walk(&mut substances);
    assert_eq!(substances.into_found(), vec![substance()]);
}

#[test]
fn collects_quantities_across_a_definition() {
    let mut quantities = TypeCollector::<Quantity>::new();
    observation_definition().walk(&mut quantities);
    let units: Vec<Option<&str>> = quantities
        .found()
        .iter()
        .map(|q| q.unit().and_then(|u| u.value.as_deref()))
        .collect();
    assert_eq!(units, [Some("mmol/L"), Some("mmol/L")]);
}

#[test]
fn well_formed_fixtures_validate_as_trees() {
    assert!(validate_tree(&medication()).is_empty());
    assert!(validate_tree(&medication_knowledge()).is_empty());
    assert!(validate_tree(&substance()).is_empty());
    assert!(validate_tree(&observation_definition()).is_empty());
    assert!(validate_tree(&parameters()).is_empty());
}
