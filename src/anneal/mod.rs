//! Simulated annealing for [`SpinSystem`](crate::spin::SpinSystem).
//!
//! Single-spin-flip Metropolis moves under an inverse temperature `beta`
//! that rises over the run. The acceptance rule adds a "tunneling floor":
//! a move is accepted with probability
//!
//! ```text
//! max(exp(min(-beta * dE, clamp)), floor / (1 + beta))
//! ```
//!
//! The floor keeps a small chance of accepting any move even late in the
//! run. Setting it to zero gives plain Metropolis acceptance.
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod acceptance;
mod config;
mod runner;

pub use acceptance::{acceptance_probability, boltzmann_term, tunneling_floor};
pub use config::{AnnealConfig, BetaSchedule, EnergyEvaluation};
pub use runner::{AnnealResult, Annealer};

pub(crate) use runner::anneal_default;
