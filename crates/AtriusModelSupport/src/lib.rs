//! # FHIR Model Support Types
//!
//! This crate provides the foundational traits and types shared between the
//! `atrius-macros` derives and the generated FHIR object model. The derives only
//! emit code against the items defined here, so the model crate and any future
//! FHIR version can plug into the same traversal and validation machinery.
//!
//! ## Overview
//!
//! - [`Visitor`] / [`Visitable`] - depth-first traversal with pre/post hooks and
//!   the ability to suppress descent into a subtree
//! - [`FhirModel`] / [`ModelBuilder`] - the immutable-value and builder contract
//!   every generated resource, backbone element and complex type implements
//! - [`ValidationError`] - the single construction-time error taxonomy
//! - [`Invariant`] - metadata describing a FHIR constraint
//! - [`HashCode`] - lazily computed, cached structural hash
//!
//! ## Usage Example
//!
//! ```rust
//! use atrius_model_support::{Visitable, Visitor};
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl Visitor for Counter {
//!     fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
//!         self.0 += 1;
//!         true
//!     }
//! }
//!
//! let mut counter = Counter::default();
//! "hello".to_string().walk(&mut counter);
//! assert_eq!(counter.0, 1);
//! ```

pub mod hash_code;
pub mod resource_types;
pub mod traits;
pub mod validate;
pub mod visitor;

pub use hash_code::HashCode;
pub use resource_types::{is_resource_type, RESOURCE_TYPES};
pub use traits::*;
pub use validate::*;
pub use visitor::*;
