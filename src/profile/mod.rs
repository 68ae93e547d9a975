//! Capability profiles: the five 0-100 scores describing a venture.
//!
//! Profiles arrive from an upstream analysis step as loosely-typed JSON.
//! Every score is coerced and clamped on the way in, so a constructed
//! profile always holds five valid scores.

pub mod coerce;
pub mod types;

pub use coerce::*;
pub use types::*;
