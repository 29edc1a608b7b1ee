//! Ensemble configuration.

use crate::anneal::AnnealConfig;
use crate::error::{IsingError, Result};

/// Configuration for an ensemble sweep.
///
/// # Examples
///
/// ```
/// use u_ising::ensemble::EnsembleConfig;
///
/// let config = EnsembleConfig::new(20, 0..20).with_steps(200);
/// assert_eq!(config.seeds.len(), 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleConfig {
    /// Spins per system.
    pub n: usize,

    /// One member per seed, used for both construction and annealing.
    pub seeds: Vec<u64>,

    /// Annealing iterations per member.
    pub steps: usize,

    /// Template for every member's anneal. Its `steps` and `seed` are
    /// replaced per member.
    pub anneal: AnnealConfig,

    /// Whether to anneal members in parallel (requires the `parallel` feature).
    pub parallel: bool,
}

impl EnsembleConfig {
    pub fn new(n: usize, seeds: impl IntoIterator<Item = u64>) -> Self {
        Self {
            n,
            seeds: seeds.into_iter().collect(),
            steps: 200,
            anneal: AnnealConfig::default(),
            parallel: true,
        }
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The anneal configuration for the member with `seed`.
    pub fn member_anneal(&self, seed: u64) -> AnnealConfig {
        self.anneal.clone().with_steps(self.steps).with_seed(seed)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(IsingError::InvalidSize(self.n));
        }
        if self.seeds.is_empty() {
            return Err(IsingError::InvalidParameter(
                "ensemble needs at least one seed".into(),
            ));
        }
        self.anneal.validate()
    }
}
