//! Annealing execution loop.

use super::acceptance::{boltzmann_term, tunneling_floor};
use super::config::{AnnealConfig, EnergyEvaluation};
use crate::error::Result;
use crate::random::create_rng;
use crate::spin::SpinSystem;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Result of an annealing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// Energy before the first proposal.
    pub initial_energy: f64,

    /// Energy of the configuration left in the system.
    pub final_energy: f64,

    /// Lowest energy visited. The system is not rolled back to it.
    pub best_energy: f64,

    /// Iterations completed.
    pub steps: usize,

    /// Total flip proposals.
    pub proposals: usize,

    /// Accepted flips (including improvements).
    pub accepted: usize,

    /// Accepted flips that lowered the energy.
    pub improving: usize,

    /// Accepted flips that only the tunneling floor let through.
    pub floor_accepts: usize,

    /// Beta of the last completed iteration.
    pub final_beta: f64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Current energy sampled every `history_interval` iterations, plus the
    /// initial and final energies.
    pub energy_history: Vec<f64>,
}

impl AnnealResult {
    /// Fraction of proposals accepted. 0 when nothing was proposed.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.proposals == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposals as f64
        }
    }
}

/// Executes annealing runs on a [`SpinSystem`].
pub struct Annealer;

impl Annealer {
    /// Anneals `system` in place.
    pub fn run(system: &mut SpinSystem, config: &AnnealConfig) -> Result<AnnealResult> {
        Self::run_with_cancel(system, config, None)
    }

    /// Anneals with an optional cancellation token, checked before each iteration.
    pub fn run_with_cancel(
        system: &mut SpinSystem,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult> {
        config.validate()?;
        Ok(anneal_loop(system, config, cancel.as_deref()))
    }
}

/// Reference anneal used by [`SpinSystem::anneal`].
pub(crate) fn anneal_default(system: &mut SpinSystem, steps: usize, seed: u64) -> f64 {
    anneal_loop(system, &AnnealConfig::new(steps, seed), None).final_energy
}

/// Runs the loop. `config` must already be valid.
fn anneal_loop(
    system: &mut SpinSystem,
    config: &AnnealConfig,
    cancel: Option<&AtomicBool>,
) -> AnnealResult {
    let n = system.len();
    let mut rng = create_rng(config.seed);

    let initial_energy = system.energy();
    let mut current_energy = initial_energy;
    let mut best_energy = initial_energy;

    let mut proposals = 0usize;
    let mut accepted = 0usize;
    let mut improving = 0usize;
    let mut floor_accepts = 0usize;
    let mut final_beta = config.schedule.beta_at(0, config.steps);
    let mut completed = 0usize;
    let mut cancelled = false;

    let mut energy_history = vec![initial_energy];

    debug!(
        n,
        steps = config.steps,
        seed = config.seed,
        initial_energy,
        "anneal start"
    );

    for t in 0..config.steps {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                warn!(step = t, "anneal cancelled");
                break;
            }
        }

        let beta = config.schedule.beta_at(t, config.steps);
        let floor = tunneling_floor(beta, config.tunneling_floor);

        for _ in 0..config.trials_per_step {
            let i = rng.random_range(0..n);

            // Flip first, then decide whether to keep it.
            let (delta, after) = match config.evaluation {
                EnergyEvaluation::Full => {
                    let before = system.energy();
                    system.flip_unchecked(i);
                    let after = system.energy();
                    (after - before, after)
                }
                EnergyEvaluation::Incremental => {
                    let delta = system.flip_delta_unchecked(i);
                    system.flip_unchecked(i);
                    (delta, current_energy + delta)
                }
            };

            let boltzmann = boltzmann_term(delta, beta, config.exponent_clamp);
            let u: f64 = rng.random_range(0.0..1.0);
            proposals += 1;

            if u < boltzmann.max(floor) {
                accepted += 1;
                if delta < 0.0 {
                    improving += 1;
                }
                if u >= boltzmann {
                    floor_accepts += 1;
                }
                current_energy = after;
                if current_energy < best_energy {
                    best_energy = current_energy;
                }
            } else {
                system.flip_unchecked(i);
            }
        }

        final_beta = beta;
        completed += 1;

        if completed % config.history_interval == 0 {
            trace!(step = completed, beta, energy = current_energy, "anneal progress");
            energy_history.push(current_energy);
        }
    }

    let final_energy = system.energy();
    if energy_history
        .last()
        .map_or(true, |&last| last.to_bits() != final_energy.to_bits())
    {
        energy_history.push(final_energy);
    }
    if final_energy < best_energy {
        best_energy = final_energy;
    }

    let result = AnnealResult {
        initial_energy,
        final_energy,
        best_energy,
        steps: completed,
        proposals,
        accepted,
        improving,
        floor_accepts,
        final_beta,
        cancelled,
        energy_history,
    };

    debug!(
        final_energy,
        best_energy,
        accepted,
        proposals,
        acceptance = result.acceptance_ratio(),
        "anneal done"
    );

    result
}
