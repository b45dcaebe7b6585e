//! Report assembly and document rendering.

mod document;
mod report;

pub use document::*;
pub use report::*;
