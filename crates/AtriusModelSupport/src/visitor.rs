use std::any::Any;
use std::fmt;

use crate::validate::ValidationError;

/// The value carried by a primitive node, as seen by a [`Visitor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i64),
    /// Decimal values keep their original lexical form.
    Decimal(&'a str),
    Text(&'a str),
}

impl fmt::Display for PrimitiveValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Boolean(b) => write!(f, "{b}"),
            PrimitiveValue::Integer(i) => write!(f, "{i}"),
            PrimitiveValue::Decimal(d) => f.write_str(d),
            PrimitiveValue::Text(s) => f.write_str(s),
        }
    }
}

/// Callbacks invoked while walking a tree of [`Visitable`] nodes.
///
/// For every node the walk calls, in order:
///
/// 1. [`pre_visit`](Visitor::pre_visit) - returning `false` skips the node entirely
/// 2. [`visit_start`](Visitor::visit_start)
/// 3. [`visit`](Visitor::visit) - returning `false` suppresses descent into children
/// 4. children in declaration order (lists wrapped in
///    [`visit_list_start`](Visitor::visit_list_start) / [`visit_list_end`](Visitor::visit_list_end))
/// 5. [`visit_end`](Visitor::visit_end)
/// 6. [`post_visit`](Visitor::post_visit)
///
/// Every hook has a no-op default so implementors only override what they need.
pub trait Visitor {
    fn pre_visit(&mut self, _node: &dyn Visitable) -> bool {
        true
    }

    fn visit_start(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) {}

    fn visit(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) -> bool {
        true
    }

    fn visit_end(&mut self, _element_name: &str, _element_index: Option<usize>, _node: &dyn Visitable) {}

    fn post_visit(&mut self, _node: &dyn Visitable) {}

    fn visit_list_start(&mut self, _element_name: &str, _len: usize) {}

    fn visit_list_end(&mut self, _element_name: &str, _len: usize) {}
}

/// A node of the FHIR object tree that can be walked by a [`Visitor`].
pub trait Visitable: Any {
    /// FHIR type name of this node (`"Medication"`, `"CodeableConcept"`, `"string"`, ...).
    fn type_name(&self) -> &'static str;

    /// Runs the visitor protocol for this node under the given element name.
    fn accept(&self, element_name: &str, element_index: Option<usize>, visitor: &mut dyn Visitor);

    /// `true` if any child node is present.
    fn has_children(&self) -> bool;

    /// `true` for primitives that carry a value.
    fn has_value(&self) -> bool {
        false
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    /// Re-checks this node's own constraints (not its children's).
    fn validate_node(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Walks this node as a root, using its type name as the element name.
    fn walk(&self, visitor: &mut dyn Visitor)
    where
        Self: Sized,
    {
        self.accept(self.type_name(), None, visitor);
    }
}

impl dyn Visitable {
    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Runs the visitor protocol around `children`.
///
/// This is the single place the pre-visit/descent/post-visit contract lives; the
/// derived `accept` implementations pass a closure that accepts each present
/// child in declaration order.
pub fn accept_with<F>(
    node: &dyn Visitable,
    element_name: &str,
    element_index: Option<usize>,
    visitor: &mut dyn Visitor,
    children: F,
) where
    F: FnOnce(&mut dyn Visitor),
{
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(element_name, element_index, node);
    if visitor.visit(element_name, element_index, node) {
        children(&mut *visitor);
    }
    visitor.visit_end(element_name, element_index, node);
    visitor.post_visit(node);
}

pub fn accept_required<T: Visitable>(value: &T, element_name: &str, visitor: &mut dyn Visitor) {
    value.accept(element_name, None, visitor);
}

pub fn accept_option<T: Visitable>(value: Option<&T>, element_name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        value.accept(element_name, None, visitor);
    }
}

pub fn accept_list<T: Visitable>(values: &[T], element_name: &str, visitor: &mut dyn Visitor) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(element_name, values.len());
    for (index, value) in values.iter().enumerate() {
        value.accept(element_name, Some(index), visitor);
    }
    visitor.visit_list_end(element_name, values.len());
}

impl<T: Visitable> Visitable for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn accept(&self, element_name: &str, element_index: Option<usize>, visitor: &mut dyn Visitor) {
        (**self).accept(element_name, element_index, visitor)
    }

    fn has_children(&self) -> bool {
        (**self).has_children()
    }

    fn has_value(&self) -> bool {
        (**self).has_value()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        (**self).primitive_value()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn validate_node(&self) -> Result<(), ValidationError> {
        (**self).validate_node()
    }
}

// Plain strings appear as `Element.id` and `Extension.url`.
impl Visitable for String {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn accept(&self, element_name: &str, element_index: Option<usize>, visitor: &mut dyn Visitor) {
        accept_with(self, element_name, element_index, visitor, |_| {});
    }

    fn has_children(&self) -> bool {
        false
    }

    fn has_value(&self) -> bool {
        true
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        Some(PrimitiveValue::Text(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        descend: bool,
    }

    impl Visitor for Recorder {
        fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
            self.events.push(format!("pre:{}", node.type_name()));
            true
        }

        fn visit_start(&mut self, name: &str, index: Option<usize>, _node: &dyn Visitable) {
            self.events.push(format!("start:{name}:{index:?}"));
        }

        fn visit(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
            self.events.push(format!("visit:{name}"));
            self.descend
        }

        fn visit_end(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) {
            self.events.push(format!("end:{name}"));
        }

        fn post_visit(&mut self, node: &dyn Visitable) {
            self.events.push(format!("post:{}", node.type_name()));
        }

        fn visit_list_start(&mut self, name: &str, len: usize) {
            self.events.push(format!("list:{name}:{len}"));
        }
    }

    #[test]
    fn string_node_runs_full_protocol() {
        let mut recorder = Recorder { descend: true, ..Default::default() };
        "abc".to_string().accept("url", None, &mut recorder);
        assert_eq!(
            recorder.events,
            vec!["pre:string", "start:url:None", "visit:url", "end:url", "post:string"]
        );
    }

    #[test]
    fn list_elements_carry_indices() {
        let mut recorder = Recorder { descend: true, ..Default::default() };
        let values = vec!["a".to_string(), "b".to_string()];
        accept_list(&values, "given", &mut recorder);
        assert_eq!(recorder.events[0], "list:given:2");
        assert!(recorder.events.contains(&"start:given:Some(1)".to_string()));
    }

    #[test]
    fn empty_list_is_not_announced() {
        let mut recorder = Recorder::default();
        accept_list::<String>(&[], "given", &mut recorder);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn suppressed_descent_skips_children() {
        let mut recorder = Recorder { descend: false, ..Default::default() };
        let node = "root".to_string();
        accept_with(&node, "root", None, &mut recorder, |v| {
            "child".to_string().accept("child", None, v);
        });
        assert!(!recorder.events.iter().any(|e| e.contains("child")));
        assert_eq!(recorder.events.last().map(String::as_str), Some("post:string"));
    }

    #[test]
    fn downcast_through_dyn() {
        let node = "x".to_string();
        let dyn_node: &dyn Visitable = &node;
        assert!(dyn_node.is::<String>());
        assert_eq!(dyn_node.downcast_ref::<String>().map(String::as_str), Some("x"));
    }
}
