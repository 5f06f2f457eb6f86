//! FHIR R5 model types.
//!
//! Everything is re-exported flat, so `r5::Medication`, `r5::Quantity` and
//! `r5::MedicationStatus` are all reachable from here. Note that the FHIR
//! `string` primitive is exported as [`String`]; import it under another name
//! (`String as FhirString`) next to `std::string::String`.

pub mod codes;
pub mod complex_types;
pub mod data_type;
pub mod primitives;
pub mod resource;
pub mod resources;

pub use codes::*;
pub use complex_types::*;
pub use data_type::*;
pub use primitives::*;
pub use resource::*;
pub use resources::*;
