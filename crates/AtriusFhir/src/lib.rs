//! # Atrius FHIR Model
//!
//! An immutable object model for FHIR R5: every resource, backbone element and
//! complex data type is a value with typed fields, accessors and a builder that
//! validates on `build()`.
//!
//! ## Overview
//!
//! - [`r5`] - primitives, code enums, complex data types, resources and the
//!   [`r5::DataType`] / [`r5::Resource`] unions
//! - [`json`] - FHIR JSON in and out, always through the validating builders
//! - [`visitor`] - stock visitors: paths, type collection, tree printing and
//!   whole-tree validation
//! - [`cli`] - the `atrius-model-cli` command line
//!
//! ## Building and changing values
//!
//! ```rust
//! use atrius_fhir_model::r5::{CodeableConcept, Medication, MedicationStatus};
//!
//! let medication = Medication::builder()
//!     .id("amoxicillin")
//!     .status(MedicationStatus::Active)
//!     .code(CodeableConcept::from_text("Amoxicillin 250mg").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Instances are immutable; "mutation" goes through a new builder.
//! let inactive = medication
//!     .to_builder()
//!     .status(MedicationStatus::Inactive)
//!     .build()
//!     .unwrap();
//! assert_ne!(medication, inactive);
//! assert_eq!(medication, medication.to_builder().build().unwrap());
//! assert_eq!(medication.hash_code(), medication.clone().hash_code());
//! ```
//!
//! ## Validation
//!
//! `build()` reports the first violated constraint as a
//! [`ValidationError`](atrius_model_support::ValidationError): missing required
//! elements, empty required lists, choice values of an undeclared type,
//! reference targets of the wrong resource type, invalid primitive content and
//! FHIR invariants (`rat-1`, `obd-0`, `inv-1`, ...).
//!
//! ```rust
//! use atrius_fhir_model::r5::{DataType, MedicationIngredient};
//!
//! let err = MedicationIngredient::builder()
//!     .strength(DataType::Boolean(true.into()))
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.element(), Some("item"));
//! ```

pub mod cli;
pub mod date_time;
pub mod element;
pub mod error;
pub mod json;
pub mod precise_decimal;
pub mod primitive;
pub mod r5;
pub mod serde_support;
pub mod visitor;

pub use atrius_model_support::{FhirModel, ModelBuilder, ValidationError, Visitable, Visitor};
pub use date_time::{DatePrecision, DateTimePrecision, PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime};
pub use element::Element;
pub use error::{ModelError, ModelResult};
pub use precise_decimal::PreciseDecimal;
pub use primitive::{Integer64Value, PrimitiveKind};
