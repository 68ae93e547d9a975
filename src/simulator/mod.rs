//! Monte Carlo survival simulator.
//!
//! Runs thousands of independent rollouts of a venture through the stage
//! sequence to estimate:
//! - How often it survives every stage
//! - Where the failures concentrate (the bottleneck stage)
//!
//! Survival probabilities come from `stages::StageModel`; this module only
//! draws, counts and reports.

mod config;
mod report;
mod result;
mod rollout;
mod runner;

pub use config::{SimConfig, DEFAULT_ITERATIONS};
pub use report::SimReport;
pub use result::{bottleneck_of, SimulationResult, Tally};
pub use rollout::{rollout, RolloutOutcome, RolloutState};
pub use runner::{run_simulation, run_simulation_with};
