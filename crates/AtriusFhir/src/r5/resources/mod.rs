pub mod medication;
pub use medication::*;

pub mod medication_knowledge;
pub use medication_knowledge::*;

pub mod observation_definition;
pub use observation_definition::*;

pub mod parameters;
pub use parameters::*;

pub mod substance;
pub use substance::*;
