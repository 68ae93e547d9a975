//! Startup Hell - stage-wise venture survival simulator.
//!
//! A venture is described by five 0-100 capability scores. Each growth
//! stage turns those scores into a survival probability, and the simulator
//! rolls many ventures through the stage sequence to estimate the overall
//! survival rate and the stage that kills most of them.

pub mod error;
pub mod profile;
pub mod simulator;
pub mod stages;

pub use error::{ConfigurationError, SimError};
pub use profile::{Capability, CapabilityProfile};
pub use simulator::{run_simulation, run_simulation_with, SimConfig, SimReport, SimulationResult};
pub use stages::{compute_survival, Stage, StageModel};
