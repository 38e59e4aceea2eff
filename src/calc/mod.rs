pub mod dto;
pub mod engine;

pub use dto::CalculationForm;
pub use engine::{calculate, CalculationInput, CalculationRecord};
