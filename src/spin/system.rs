//! The spin system: state, energy, and perturbations.

use super::coupling::CouplingMatrix;
use super::types::Spin;
use crate::error::{IsingError, Result};
use crate::random::{create_rng, random_spin};
use rand::Rng;

/// An Ising configuration with fixed size N.
///
/// # Examples
///
/// ```
/// use u_ising::spin::SpinSystem;
///
/// let mut system = SpinSystem::new(20, 42).unwrap();
/// let e0 = system.energy();
/// let e1 = system.anneal(200, 42);
/// assert!(e1 <= e0);
/// assert_eq!(e1, system.energy());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSpinSystem"))]
pub struct SpinSystem {
    spins: Vec<Spin>,
    coupling: CouplingMatrix,
    field: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through [`SpinSystem::from_parts`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSpinSystem {
    spins: Vec<Spin>,
    coupling: CouplingMatrix,
    field: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSpinSystem> for SpinSystem {
    type Error = IsingError;

    fn try_from(raw: RawSpinSystem) -> Result<Self> {
        Self::from_parts(raw.spins, raw.coupling, raw.field)
    }
}

impl SpinSystem {
    /// Creates `n` spins drawn uniformly from `seed`, with the parity coupling
    /// rule and the linear field `h_i = 0.1 * (i/n - 0.5)`.
    pub fn new(n: usize, seed: u64) -> Result<Self> {
        if n == 0 {
            return Err(IsingError::InvalidSize(n));
        }
        let mut rng = create_rng(seed);
        let spins = (0..n).map(|_| random_spin(&mut rng)).collect();
        let field = (0..n)
            .map(|i| 0.1 * (i as f64 / n as f64 - 0.5))
            .collect();
        Ok(Self {
            spins,
            coupling: CouplingMatrix::parity_rule(n),
            field,
        })
    }

    /// Assembles a system from explicit parts.
    pub fn from_parts(spins: Vec<Spin>, coupling: CouplingMatrix, field: Vec<f64>) -> Result<Self> {
        let n = spins.len();
        if n == 0 {
            return Err(IsingError::InvalidSize(n));
        }
        if coupling.len() != n {
            return Err(IsingError::DimensionMismatch {
                what: "coupling",
                expected: n,
                actual: coupling.len(),
            });
        }
        if field.len() != n {
            return Err(IsingError::DimensionMismatch {
                what: "field",
                expected: n,
                actual: field.len(),
            });
        }
        if field.iter().any(|h| !h.is_finite()) {
            return Err(IsingError::NonFinite("field"));
        }
        Ok(Self {
            spins,
            coupling,
            field,
        })
    }

    /// Number of spins.
    pub fn len(&self) -> usize {
        self.spins.len()
    }

    /// Always `false`: construction rejects empty systems.
    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    /// Spins as `±1.0` floats.
    pub fn spin_values(&self) -> Vec<f64> {
        self.spins.iter().map(|s| s.value()).collect()
    }

    pub fn coupling(&self) -> &CouplingMatrix {
        &self.coupling
    }

    pub fn field(&self) -> &[f64] {
        &self.field
    }

    /// Total energy `H = -Σ_{i<j} J_ij s_i s_j - Σ_i h_i s_i`.
    ///
    /// Always recomputed from scratch in O(N²).
    pub fn energy(&self) -> f64 {
        let n = self.spins.len();
        let mut e = 0.0;
        for i in 0..n {
            let si = self.spins[i].value();
            let row = self.coupling.row(i);
            for j in (i + 1)..n {
                e -= row[j] * si * self.spins[j].value();
            }
        }
        for i in 0..n {
            e -= self.field[i] * self.spins[i].value();
        }
        e
    }

    /// Mean spin value in [-1, 1].
    pub fn magnetization(&self) -> f64 {
        self.spins.iter().map(|s| s.value()).sum::<f64>() / self.spins.len() as f64
    }

    /// Effective field on spin `i`: `Σ_j J_ij s_j + h_i`.
    pub fn local_field(&self, i: usize) -> Result<f64> {
        self.check_index(i)?;
        Ok(self.local_field_unchecked(i))
    }

    /// Energy change that flipping spin `i` would cause, `2 s_i (Σ_j J_ij s_j + h_i)`.
    pub fn flip_delta(&self, i: usize) -> Result<f64> {
        self.check_index(i)?;
        Ok(self.flip_delta_unchecked(i))
    }

    pub(crate) fn flip_delta_unchecked(&self, i: usize) -> f64 {
        2.0 * self.spins[i].value() * self.local_field_unchecked(i)
    }

    fn local_field_unchecked(&self, i: usize) -> f64 {
        let coupled: f64 = self
            .coupling
            .row(i)
            .iter()
            .zip(&self.spins)
            .map(|(w, s)| w * s.value())
            .sum();
        coupled + self.field[i]
    }

    /// Flips spin `i` in place.
    pub fn flip(&mut self, i: usize) -> Result<()> {
        self.check_index(i)?;
        self.flip_unchecked(i);
        Ok(())
    }

    #[inline]
    pub(crate) fn flip_unchecked(&mut self, i: usize) {
        self.spins[i] = self.spins[i].flipped();
    }

    pub fn set_spin(&mut self, i: usize, spin: Spin) -> Result<()> {
        self.check_index(i)?;
        self.spins[i] = spin;
        Ok(())
    }

    /// Sets the coupling of the pair `(i, j)`, keeping the matrix symmetric.
    pub fn set_coupling(&mut self, i: usize, j: usize, weight: f64) -> Result<()> {
        self.coupling.set(i, j, weight)
    }

    /// Anneals with the default schedule and returns the final energy.
    ///
    /// See [`crate::anneal::AnnealConfig::new`] for the schedule.
    pub fn anneal(&mut self, steps: usize, seed: u64) -> f64 {
        crate::anneal::anneal_default(self, steps, seed)
    }

    /// Flips each spin independently with probability `1 - exp(-temperature)`.
    ///
    /// Returns the number of spins flipped.
    pub fn add_thermal_noise(&mut self, temperature: f64, seed: u64) -> Result<usize> {
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(IsingError::InvalidParameter(format!(
                "temperature must be finite and non-negative, got {temperature}"
            )));
        }
        let p = 1.0 - (-temperature).exp();
        let mut rng = create_rng(seed);
        let mut flipped = 0;
        for spin in &mut self.spins {
            if rng.random_range(0.0..1.0) < p {
                *spin = spin.flipped();
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    /// Adds a uniform bias `strength` to every field entry.
    ///
    /// Leaves the field unchanged if any sum overflows.
    pub fn introduce_external_field(&mut self, strength: f64) -> Result<()> {
        if !strength.is_finite() {
            return Err(IsingError::NonFinite("field strength"));
        }
        if self.field.iter().any(|h| !(h + strength).is_finite()) {
            return Err(IsingError::NonFinite("field"));
        }
        for h in &mut self.field {
            *h += strength;
        }
        Ok(())
    }

    /// Multiplies every coupling by `factor`.
    pub fn scale_coupling(&mut self, factor: f64) -> Result<()> {
        self.coupling.scale(factor)
    }

    /// Adds seeded `U[0, magnitude)` noise to every coupling pair.
    pub fn jitter_coupling(&mut self, magnitude: f64, seed: u64) -> Result<()> {
        let mut rng = create_rng(seed);
        self.coupling.jitter(magnitude, &mut rng)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.spins.len() {
            return Err(IsingError::IndexOutOfRange {
                index,
                len: self.spins.len(),
            });
        }
        Ok(())
    }
}
