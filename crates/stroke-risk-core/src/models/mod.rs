//! Domain models for the stroke risk pipeline.

mod features;
mod patient;
mod prediction;

pub use features::*;
pub use patient::*;
pub use prediction::*;
