//! Annealing configuration and beta schedules.

use crate::error::{IsingError, Result};

/// Inverse-temperature schedule over `steps` iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetaSchedule {
    /// `beta_t = initial * exp(rate * t / steps)`.
    ///
    /// With the defaults (`initial = 0.1`, `rate = 10`) beta grows from 0.1
    /// to about 2200 over the run.
    Exponential {
        /// Beta at `t = 0`. Must be positive.
        initial: f64,
        /// Growth rate over the whole run.
        rate: f64,
    },

    /// `beta_t = start + (end - start) * t / steps`.
    Linear { start: f64, end: f64 },

    /// Fixed beta (Metropolis sampling at one temperature).
    Constant { beta: f64 },
}

impl Default for BetaSchedule {
    fn default() -> Self {
        BetaSchedule::Exponential {
            initial: 0.1,
            rate: 10.0,
        }
    }
}

impl BetaSchedule {
    /// Beta at iteration `t` (0-indexed) of a run with `steps` iterations.
    pub fn beta_at(&self, t: usize, steps: usize) -> f64 {
        let frac = if steps == 0 {
            0.0
        } else {
            t as f64 / steps as f64
        };
        match *self {
            BetaSchedule::Exponential { initial, rate } => initial * (rate * frac).exp(),
            BetaSchedule::Linear { start, end } => start + (end - start) * frac,
            BetaSchedule::Constant { beta } => beta,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            BetaSchedule::Exponential { initial, rate } => {
                if !initial.is_finite() || initial <= 0.0 {
                    return Err(IsingError::InvalidParameter(format!(
                        "exponential initial beta must be positive, got {initial}"
                    )));
                }
                if !rate.is_finite() {
                    return Err(IsingError::NonFinite("exponential rate"));
                }
            }
            BetaSchedule::Linear { start, end } => {
                if !start.is_finite() || !end.is_finite() {
                    return Err(IsingError::NonFinite("linear beta bounds"));
                }
                if start < 0.0 || end < 0.0 {
                    return Err(IsingError::InvalidParameter(format!(
                        "linear beta bounds must be non-negative, got {start}..{end}"
                    )));
                }
            }
            BetaSchedule::Constant { beta } => {
                if !beta.is_finite() || beta < 0.0 {
                    return Err(IsingError::InvalidParameter(format!(
                        "constant beta must be finite and non-negative, got {beta}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// How the energy change of a proposed flip is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyEvaluation {
    /// Recompute the full energy before and after the flip.
    ///
    /// O(N²) per proposal. This is the reproducible reference mode.
    #[default]
    Full,

    /// Use the local field, `dE = 2 s_i (Σ_j J_ij s_j + h_i)`.
    ///
    /// O(N) per proposal. May differ from `Full` in the last bits, so
    /// trajectories can diverge on near-ties.
    Incremental,
}

/// Configuration for an annealing run.
///
/// # Examples
///
/// ```
/// use u_ising::anneal::{AnnealConfig, BetaSchedule, EnergyEvaluation};
///
/// let config = AnnealConfig::new(500, 7)
///     .with_trials_per_step(20)
///     .with_schedule(BetaSchedule::Linear { start: 0.1, end: 5.0 })
///     .with_tunneling_floor(0.0)
///     .with_evaluation(EnergyEvaluation::Incremental);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Number of cooling iterations.
    pub steps: usize,

    /// Seed for proposal and acceptance draws.
    pub seed: u64,

    /// Proposal trials per iteration.
    pub trials_per_step: usize,

    pub schedule: BetaSchedule,

    /// Numerator of the tunneling floor `floor / (1 + beta)`. 0 disables it.
    pub tunneling_floor: f64,

    /// Upper bound on the Boltzmann exponent `-beta * dE`.
    pub exponent_clamp: f64,

    pub evaluation: EnergyEvaluation,

    /// Record the current energy every this many iterations.
    pub history_interval: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self::new(200, 42)
    }
}

impl AnnealConfig {
    /// Reference configuration: exponential schedule from beta 0.1 with rate
    /// 10, 10 trials per step, floor 0.1, exponent clamp 500, full energy
    /// recomputation.
    pub fn new(steps: usize, seed: u64) -> Self {
        Self {
            steps,
            seed,
            trials_per_step: 10,
            schedule: BetaSchedule::default(),
            tunneling_floor: 0.1,
            exponent_clamp: 500.0,
            evaluation: EnergyEvaluation::Full,
            history_interval: 10,
        }
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_trials_per_step(mut self, n: usize) -> Self {
        self.trials_per_step = n;
        self
    }

    pub fn with_schedule(mut self, schedule: BetaSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_tunneling_floor(mut self, floor: f64) -> Self {
        self.tunneling_floor = floor;
        self
    }

    pub fn with_exponent_clamp(mut self, clamp: f64) -> Self {
        self.exponent_clamp = clamp;
        self
    }

    pub fn with_evaluation(mut self, evaluation: EnergyEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.trials_per_step == 0 {
            return Err(IsingError::InvalidParameter(
                "trials_per_step must be positive".into(),
            ));
        }
        if !self.tunneling_floor.is_finite() || self.tunneling_floor < 0.0 {
            return Err(IsingError::InvalidParameter(format!(
                "tunneling_floor must be finite and non-negative, got {}",
                self.tunneling_floor
            )));
        }
        if !self.exponent_clamp.is_finite() {
            return Err(IsingError::NonFinite("exponent_clamp"));
        }
        if self.history_interval == 0 {
            return Err(IsingError::InvalidParameter(
                "history_interval must be positive".into(),
            ));
        }
        self.schedule.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert_eq!(config.trials_per_step, 10);
        assert!((config.tunneling_floor - 0.1).abs() < 1e-15);
        assert_eq!(config.exponent_clamp, 500.0);
        assert_eq!(config.evaluation, EnergyEvaluation::Full);
        assert_eq!(
            config.schedule,
            BetaSchedule::Exponential {
                initial: 0.1,
                rate: 10.0
            }
        );
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealConfig::default().validate().is_ok());
        assert!(AnnealConfig::new(0, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_trials() {
        assert!(AnnealConfig::default().with_trials_per_step(0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_floor() {
        assert!(AnnealConfig::default().with_tunneling_floor(-0.1).validate().is_err());
        assert!(AnnealConfig::default()
            .with_tunneling_floor(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_clamp() {
        let config = AnnealConfig::default().with_exponent_clamp(f64::INFINITY);
        assert_eq!(config.validate(), Err(IsingError::NonFinite("exponent_clamp")));
    }

    #[test]
    fn test_validate_bad_schedule() {
        let bad = [
            BetaSchedule::Exponential { initial: 0.0, rate: 10.0 },
            BetaSchedule::Exponential { initial: 0.1, rate: f64::NAN },
            BetaSchedule::Linear { start: -1.0, end: 1.0 },
            BetaSchedule::Constant { beta: f64::INFINITY },
        ];
        for schedule in bad {
            let config = AnnealConfig::default().with_schedule(schedule);
            assert!(config.validate().is_err(), "{schedule:?} should be rejected");
        }
    }

    #[test]
    fn test_exponential_schedule() {
        let s = BetaSchedule::default();
        assert!((s.beta_at(0, 200) - 0.1).abs() < 1e-15);
        assert!((s.beta_at(100, 200) - 0.1 * 5.0f64.exp()).abs() < 1e-9);
        // The last iteration stops just short of initial * exp(rate).
        assert!(s.beta_at(199, 200) < 0.1 * 10.0f64.exp());
    }

    #[test]
    fn test_linear_schedule() {
        let s = BetaSchedule::Linear { start: 1.0, end: 3.0 };
        assert_eq!(s.beta_at(0, 4), 1.0);
        assert_eq!(s.beta_at(2, 4), 2.0);
    }

    #[test]
    fn test_schedule_zero_steps() {
        let s = BetaSchedule::default();
        assert_eq!(s.beta_at(0, 0), 0.1);
    }
}
