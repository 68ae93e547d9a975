//! The fixed growth-stage sequence and the per-stage survival model.

pub mod model;
pub mod types;

pub use model::*;
pub use types::*;
