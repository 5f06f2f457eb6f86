//! Ready-made [`Visitor`] implementations.
//!
//! ```rust
//! use atrius_fhir_model::r5::{CodeableReference, Medication, MedicationIngredient, Reference};
//! use atrius_fhir_model::visitor::PathCollector;
//! use atrius_model_support::Visitable;
//!
//! let item = CodeableReference::builder()
//!     .reference(Reference::to("Substance/s1").unwrap())
//!     .build()
//!     .unwrap();
//! let medication = Medication::builder()
//!     .ingredient(MedicationIngredient::builder().item(item).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut paths = PathCollector::new();
//! medication.walk(&mut paths);
//! assert!(paths.contains("Medication.ingredient[0].item.reference.reference"));
//! ```

use std::fmt::Write;

use atrius_model_support::{ValidationError, Visitable, Visitor};

/// FHIRPath-style location of the node being visited.
#[derive(Debug, Default)]
struct PathStack {
    stack: Vec<String>,
}

impl PathStack {
    fn enter(&mut self, element_name: &str, element_index: Option<usize>) -> &str {
        let mut path = match self.stack.last() {
            Some(parent) => format!("{parent}.{element_name}"),
            None => element_name.to_string(),
        };
        if let Some(index) = element_index {
            let _ = write!(path, "[{index}]");
        }
        self.stack.push(path);
        self.current()
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn current(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or_default()
    }
}

/// Records the path and FHIR type of every visited node.
#[derive(Debug, Default)]
pub struct PathCollector {
    location: PathStack,
    paths: Vec<(String, &'static str)>,
}

impl PathCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(path, type name)` pairs in visit order.
    pub fn paths(&self) -> &[(String, &'static str)] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|(p, _)| p == path)
    }

    pub fn into_paths(self) -> Vec<(String, &'static str)> {
        self.paths
    }
}

impl Visitor for PathCollector {
    fn visit_start(&mut self, element_name: &str, element_index: Option<usize>, node: &dyn Visitable) {
        let path = self.location.enter(element_name, element_index).to_string();
        self.paths.push((path, node.type_name()));
    }

    fn visit_end(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) {
        self.location.leave();
    }
}

/// Clones every node of type `T` found in a tree.
#[derive(Debug)]
pub struct TypeCollector<T> {
    found: Vec<T>,
}

impl<T> Default for TypeCollector<T> {
    fn default() -> Self {
        TypeCollector { found: Vec::new() }
    }
}

impl<T: Visitable + Clone> TypeCollector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(&self) -> &[T] {
        &self.found
    }

    pub fn into_found(self) -> Vec<T> {
        self.found
    }
}

impl<T: Visitable + Clone> Visitor for TypeCollector<T> {
    fn visit(&mut self, _element_name: &str, _element_index: Option<usize>, node: &dyn Visitable) -> bool {
        if let Some(value) = node.downcast_ref::<T>() {
            self.found.push(value.clone());
        }
        true
    }
}

/// Indented dump of a tree, one node per line.
///
/// ```text
/// Medication: Medication
///   status: code = active
/// ```
#[derive(Debug, Default)]
pub struct TreePrinter {
    output: String,
    depth: usize,
    max_depth: Option<usize>,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes deeper than `max_depth` are printed but not descended into.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl Visitor for TreePrinter {
    fn visit_start(&mut self, element_name: &str, element_index: Option<usize>, node: &dyn Visitable) {
        let indent = "  ".repeat(self.depth);
        let _ = write!(self.output, "{indent}{element_name}");
        if let Some(index) = element_index {
            let _ = write!(self.output, "[{index}]");
        }
        let _ = write!(self.output, ": {}", node.type_name());
        if let Some(value) = node.primitive_value() {
            let _ = write!(self.output, " = {value}");
        }
        self.output.push('\n');
        self.depth += 1;
    }

    fn visit(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) -> bool {
        self.max_depth.is_none_or(|max| self.depth <= max)
    }

    fn visit_end(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) {
        self.depth -= 1;
    }
}

/// A constraint violation found by [`ValidatingVisitor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeError {
    pub path: String,
    pub error: ValidationError,
}

/// Re-validates every node of a tree and keeps going after failures.
///
/// Instances built with `validating(false)` or assembled from parts can be
/// checked in one pass; each error carries the path of the offending node.
#[derive(Debug, Default)]
pub struct ValidatingVisitor {
    location: PathStack,
    errors: Vec<NodeError>,
}

impl ValidatingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[NodeError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<NodeError> {
        self.errors
    }
}

impl Visitor for ValidatingVisitor {
    fn visit_start(&mut self, element_name: &str, element_index: Option<usize>, _node: &dyn Visitable) {
        self.location.enter(element_name, element_index);
    }

    fn visit(&mut self, _element_name: &str, _element_index: Option<usize>, node: &dyn Visitable) -> bool {
        if let Err(error) = node.validate_node() {
            tracing::debug!(path = self.location.current(), %error, "node failed validation");
            self.errors.push(NodeError {
                path: self.location.current().to_string(),
                error,
            });
        }
        true
    }

    fn visit_end(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) {
        self.location.leave();
    }
}

/// Validates `root` and all of its descendants.
pub fn validate_tree(root: &dyn Visitable) -> Vec<NodeError> {
    let mut visitor = ValidatingVisitor::new();
    root.accept(root.type_name(), None, &mut visitor);
    visitor.into_errors()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r5::{
        CodeableConcept, CodeableReference, Coding, Medication, MedicationIngredient, MedicationStatus, Ratio, Reference,
    };

    fn medication() -> Medication {
        Medication::builder()
            .id("m1")
            .status(MedicationStatus::Active)
            .code(
                CodeableConcept::builder()
                    .coding(Coding::from_system_code("http://snomed.info/sct", "322236009").unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn paths_follow_declaration_order() {
        let mut collector = PathCollector::new();
        medication().walk(&mut collector);
        let paths: Vec<&str> = collector.paths().iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            [
                "Medication",
                "Medication.id",
                "Medication.code",
                "Medication.code.coding[0]",
                "Medication.code.coding[0].system",
                "Medication.code.coding[0].code",
                "Medication.status",
            ]
        );
        assert_eq!(collector.paths()[1].1, "string");
        assert_eq!(collector.paths()[6].1, "code");
    }

    #[test]
    fn collects_nodes_by_type() {
        let mut codings = TypeCollector::<Coding>::new();
        medication().walk(&mut codings);
        assert_eq!(codings.found().len(), 1);
        assert_eq!(codings.found()[0].code().and_then(|c| c.value.as_deref()), Some("322236009"));
    }

    #[test]
    fn printer_shows_primitive_values() {
        let mut printer = TreePrinter::new();
        medication().walk(&mut printer);
        let output = printer.into_output();
        assert!(output.starts_with("Medication: Medication\n"));
        assert!(output.contains("  status: code = active\n"));
        assert!(output.contains("      code: string = 322236009\n"));
    }

    #[test]
    fn printer_depth_limit_suppresses_descent() {
        let mut printer = TreePrinter::new().with_max_depth(1);
        medication().walk(&mut printer);
        let output = printer.into_output();
        assert!(output.contains("  code: CodeableConcept\n"));
        assert!(!output.contains("coding"));
    }

    #[test]
    fn finds_errors_in_unvalidated_trees() {
        let bad_strength = Ratio::builder().validating(false).build().unwrap();
        let item = CodeableReference::builder()
            .reference(Reference::to("Substance/s1").unwrap())
            .build()
            .unwrap();
        let ingredient = MedicationIngredient::builder()
            .item(item)
            .strength(bad_strength)
            .validating(false)
            .build()
            .unwrap();
        let medication = Medication::builder().ingredient(ingredient).validating(false).build().unwrap();

        let errors = validate_tree(&medication);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "Medication.ingredient[0].strength");
        assert!(matches!(errors[0].error, ValidationError::ValueOrChildren { type_name: "Ratio" }));
        assert!(validate_tree(&self::medication()).is_empty());
    }
}
