//! # Atrius Macros - Procedural Macros for the FHIR Object Model
//!
//! Two derives generate everything the model types share:
//!
//! - **`#[derive(FhirModel)]`** - an immutable type with a companion builder,
//!   accessors, validation on `build()`, structured traversal through the
//!   `Visitable` protocol and a lazily cached structural hash
//! - **`#[derive(FhirSerde)]`** - FHIR JSON serialization and deserialization
//!   that goes through the validating builder
//!
//! ## Attributes
//!
//! ```ignore
//! #[derive(Debug, Clone, PartialEq, Eq, Hash, FhirModel, FhirSerde)]
//! #[fhir_type(name = "Ratio", kind = "complex")]
//! #[fhir_invariant(
//!     key = "rat-1",
//!     severity = "error",
//!     human = "Numerator and denominator SHALL both be present, or both are absent.",
//!     expr = "(numerator.exists() and denominator.exists()) or (numerator.empty() and denominator.empty() and extension.exists())",
//!     path = "Ratio",
//!     rule = "numerator_and_denominator"
//! )]
//! pub struct Ratio {
//!     id: Option<std::string::String>,
//!     extension: Vec<Extension>,
//!     numerator: Option<Quantity>,
//!     denominator: Option<Quantity>,
//!     hash_cache: HashCode,
//! }
//! ```
//!
//! Field level:
//!
//! - `#[fhir_element(required)]` on a plain `T` field: must be set before `build()`
//! - `#[fhir_element(required)]` or `#[fhir_element(min = N)]` on a `Vec<T>`:
//!   minimum number of entries
//! - `#[fhir_element(choice = "Quantity|CodeableConcept")]`: allowed types of a
//!   `[x]` element held as a `DataType`
//! - `#[fhir_element(reference = "Organization|Patient")]`: allowed target
//!   resource types of a reference
//! - `#[fhir_serde(rename = "...")]`: JSON element name when the lowerCamelCase
//!   field name does not match
//!
//! A field of type `HashCode` holds the hash cache and is not an element.
//!
//! ## JSON shape
//!
//! FHIR primitives keep metadata in a parallel `_fieldName` object, and
//! primitive arrays are split into null-padded parallel arrays:
//!
//! ```json
//! {
//!   "given": ["John", "Michael", null],
//!   "_given": [null, {"id": "name-2"}, {"extension": [...]}]
//! }
//! ```
//!
//! Choice elements are written with a type suffix (`valueQuantity`,
//! `valueString`). The per-kind rules live in the model crate's
//! `serde_support::JsonField` implementations; the derive only wires fields to
//! them.

extern crate proc_macro;

mod attributes;
mod field_helpers;
mod model_impl;
mod serde_impl;
mod type_helpers;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(FhirModel, attributes(fhir_type, fhir_element, fhir_invariant, fhir_serde))]
pub fn fhir_model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model_impl::generate_fhir_model_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(FhirSerde, attributes(fhir_type, fhir_element, fhir_invariant, fhir_serde))]
pub fn fhir_serde_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    serde_impl::generate_fhir_serde_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
