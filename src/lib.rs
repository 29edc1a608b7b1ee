//! Ising spin systems with a reproducible simulated-annealing kernel.
//!
//! - **Spin systems** ([`spin`]): N binary spins, a symmetric non-negative
//!   coupling matrix, and a per-spin external field, with energy evaluation
//!   and seeded perturbations (thermal noise, field bias, coupling scaling).
//! - **Annealing** ([`anneal`]): single-spin-flip Metropolis moves under a
//!   rising inverse temperature, with a tunneling-floor acceptance term and
//!   a clamped Boltzmann exponent.
//! - **Ensembles** ([`ensemble`]): seed sweeps over independent systems,
//!   optionally on a rayon pool.
//!
//! Every stochastic operation takes an explicit seed. Identical seeds give
//! bit-identical spins and energies.
//!
//! # Example
//!
//! ```
//! use u_ising::spin::SpinSystem;
//!
//! let mut system = SpinSystem::new(20, 42)?;
//! let before = system.energy();
//! let after = system.anneal(200, 42);
//! assert!(after <= before);
//! # Ok::<(), u_ising::IsingError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-backed ensemble sweeps
//! - `serde`: `Serialize`/`Deserialize` for systems, configs, and results
//! - `wasm`: `wasm-bindgen` entry points

pub mod anneal;
pub mod ensemble;
mod error;
pub mod random;
pub mod spin;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{IsingError, Result};
