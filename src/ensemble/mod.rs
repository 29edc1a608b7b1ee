//! Seed sweeps over independent spin systems.
//!
//! Builds one [`SpinSystem`](crate::spin::SpinSystem) per seed, anneals each
//! with the same seed, and summarizes how far the energies dropped. Members
//! share nothing, so with the `parallel` feature they run on a rayon pool.

mod config;
mod runner;

pub use config::EnsembleConfig;
pub use runner::{EnsembleMember, EnsembleReport, EnsembleRunner};
