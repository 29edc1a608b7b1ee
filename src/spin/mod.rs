//! Ising spin systems.
//!
//! A [`SpinSystem`] holds N binary spins, a symmetric non-negative
//! [`CouplingMatrix`], and a per-spin external field. Its Hamiltonian is
//!
//! ```text
//! H = -Σ_{i<j} J_ij s_i s_j - Σ_i h_i s_i
//! ```
//!
//! Relaxation toward low energy is done by [`crate::anneal`].
//!
//! # References
//!
//! - Ising (1925), "Beitrag zur Theorie des Ferromagnetismus"
//! - Hopfield (1982), "Neural networks and physical systems with emergent
//!   collective computational abilities"

mod coupling;
mod system;
mod types;

pub use coupling::CouplingMatrix;
pub use system::SpinSystem;
pub use types::Spin;
