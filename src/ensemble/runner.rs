//! Ensemble execution.

use super::config::EnsembleConfig;
use crate::anneal::Annealer;
use crate::error::Result;
use crate::spin::SpinSystem;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

/// Outcome for one seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleMember {
    pub seed: u64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub magnetization: f64,
    pub acceptance_ratio: f64,
}

impl EnsembleMember {
    /// Whether annealing strictly lowered the energy.
    pub fn improved(&self) -> bool {
        self.final_energy < self.initial_energy
    }
}

/// Results of an ensemble sweep, in seed order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleReport {
    pub members: Vec<EnsembleMember>,
}

impl EnsembleReport {
    /// Fraction of members whose energy strictly decreased.
    pub fn improved_fraction(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let improved = self.members.iter().filter(|m| m.improved()).count();
        improved as f64 / self.members.len() as f64
    }

    pub fn mean_final_energy(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.final_energy).sum::<f64>() / self.members.len() as f64
    }

    /// Member with the lowest final energy.
    pub fn best(&self) -> Option<&EnsembleMember> {
        self.members
            .iter()
            .min_by(|a, b| a.final_energy.total_cmp(&b.final_energy))
    }
}

/// Runs ensemble sweeps.
pub struct EnsembleRunner;

impl EnsembleRunner {
    pub fn run(config: &EnsembleConfig) -> Result<EnsembleReport> {
        config.validate()?;

        let members = if config.parallel {
            run_members_parallel(config)?
        } else {
            run_members(config)?
        };

        let report = EnsembleReport { members };
        info!(
            n = config.n,
            members = report.members.len(),
            improved = report.improved_fraction(),
            mean_final_energy = report.mean_final_energy(),
            "ensemble done"
        );
        Ok(report)
    }
}

fn run_member(config: &EnsembleConfig, seed: u64) -> Result<EnsembleMember> {
    let mut system = SpinSystem::new(config.n, seed)?;
    let result = Annealer::run(&mut system, &config.member_anneal(seed))?;
    Ok(EnsembleMember {
        seed,
        initial_energy: result.initial_energy,
        final_energy: result.final_energy,
        magnetization: system.magnetization(),
        acceptance_ratio: result.acceptance_ratio(),
    })
}

fn run_members(config: &EnsembleConfig) -> Result<Vec<EnsembleMember>> {
    config
        .seeds
        .iter()
        .map(|&seed| run_member(config, seed))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_members_parallel(config: &EnsembleConfig) -> Result<Vec<EnsembleMember>> {
    config
        .seeds
        .par_iter()
        .map(|&seed| run_member(config, seed))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_members_parallel(config: &EnsembleConfig) -> Result<Vec<EnsembleMember>> {
    run_members(config)
}
