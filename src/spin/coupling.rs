//! Symmetric pairwise coupling weights.

use crate::error::{IsingError, Result};
use rand::Rng;

/// Dense symmetric N×N coupling matrix `J`, stored row-major.
///
/// Invariants, upheld by every mutating method:
/// - `J[i][j] == J[j][i]`
/// - `J[i][i] == 0`
/// - every weight is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCouplingMatrix"))]
pub struct CouplingMatrix {
    n: usize,
    weights: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through [`CouplingMatrix::from_flat`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCouplingMatrix {
    n: usize,
    weights: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCouplingMatrix> for CouplingMatrix {
    type Error = IsingError;

    fn try_from(raw: RawCouplingMatrix) -> Result<Self> {
        Self::from_flat(raw.n, raw.weights)
    }
}

impl CouplingMatrix {
    /// All-zero couplings for `n` spins.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            weights: vec![0.0; n * n],
        }
    }

    /// The fixed construction rule: `1.0` where `(i + j) % 3 == 0`, else `0.5`.
    pub fn parity_rule(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let w = if (i + j) % 3 == 0 { 1.0 } else { 0.5 };
                m.weights[i * n + j] = w;
                m.weights[j * n + i] = w;
            }
        }
        m
    }

    /// Builds a matrix from explicit rows, checking every invariant.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(IsingError::DimensionMismatch {
                what: "coupling row",
                expected: n,
                actual: row.len(),
            });
        }
        Self::from_flat(n, rows.concat())
    }

    /// Builds a matrix from row-major `weights` of length `n * n`, checking
    /// every invariant.
    pub fn from_flat(n: usize, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != n * n {
            return Err(IsingError::DimensionMismatch {
                what: "coupling weights",
                expected: n * n,
                actual: weights.len(),
            });
        }
        for i in 0..n {
            let diag = weights[i * n + i];
            if diag != 0.0 {
                return Err(IsingError::InvalidCoupling(format!(
                    "diagonal entry ({i}, {i}) must be zero, got {diag}"
                )));
            }
            for j in (i + 1)..n {
                let (upper, lower) = (weights[i * n + j], weights[j * n + i]);
                check_weight(upper)?;
                if upper != lower {
                    return Err(IsingError::InvalidCoupling(format!(
                        "asymmetric pair ({i}, {j}): {upper} vs {lower}"
                    )));
                }
            }
        }
        Ok(Self { n, weights })
    }

    /// Number of spins the matrix couples.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Weight between spins `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "coupling index out of range");
        self.weights[i * self.n + j]
    }

    /// Row `i` of the matrix.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.weights[i * self.n..(i + 1) * self.n]
    }

    /// Sets the weight of the pair `(i, j)` on both sides of the diagonal.
    pub fn set(&mut self, i: usize, j: usize, weight: f64) -> Result<()> {
        for index in [i, j] {
            if index >= self.n {
                return Err(IsingError::IndexOutOfRange { index, len: self.n });
            }
        }
        if i == j {
            return Err(IsingError::InvalidCoupling(format!(
                "diagonal entry ({i}, {i}) is fixed at zero"
            )));
        }
        check_weight(weight)?;
        self.weights[i * self.n + j] = weight;
        self.weights[j * self.n + i] = weight;
        Ok(())
    }

    /// Multiplies every weight by `factor`.
    ///
    /// Leaves the matrix unchanged if any product overflows.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(IsingError::InvalidParameter(format!(
                "coupling scale factor must be finite and non-negative, got {factor}"
            )));
        }
        let scaled: Vec<f64> = self.weights.iter().map(|w| w * factor).collect();
        if scaled.iter().any(|w| !w.is_finite()) {
            return Err(IsingError::NonFinite("coupling weight"));
        }
        self.weights = scaled;
        Ok(())
    }

    /// Adds `U[0, magnitude)` to every off-diagonal pair, mirrored across the diagonal.
    ///
    /// Pairs are visited in `(i, j)` order with `i < j`, one draw each.
    /// Leaves the matrix unchanged if any sum overflows.
    pub fn jitter<R: Rng>(&mut self, magnitude: f64, rng: &mut R) -> Result<()> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(IsingError::InvalidParameter(format!(
                "jitter magnitude must be finite and non-negative, got {magnitude}"
            )));
        }
        if magnitude == 0.0 {
            return Ok(());
        }
        let n = self.n;
        let mut jittered = self.weights.clone();
        for i in 0..n {
            for j in (i + 1)..n {
                let w = jittered[i * n + j] + rng.random_range(0.0..magnitude);
                if !w.is_finite() {
                    return Err(IsingError::NonFinite("coupling weight"));
                }
                jittered[i * n + j] = w;
                jittered[j * n + i] = w;
            }
        }
        self.weights = jittered;
        Ok(())
    }

    /// Checks symmetry and the zero diagonal.
    pub fn is_symmetric(&self) -> bool {
        let n = self.n;
        (0..n).all(|i| {
            self.weights[i * n + i] == 0.0
                && ((i + 1)..n).all(|j| self.weights[i * n + j] == self.weights[j * n + i])
        })
    }

    /// Sum of weights over unordered pairs, `Σ_{i<j} J_ij`.
    ///
    /// This is the magnitude of the coupling term in the fully aligned state.
    pub fn pair_sum(&self) -> f64 {
        let n = self.n;
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| self.weights[i * n + j])
            .sum()
    }
}

fn check_weight(w: f64) -> Result<()> {
    if !w.is_finite() {
        return Err(IsingError::NonFinite("coupling weight"));
    }
    if w < 0.0 {
        return Err(IsingError::InvalidCoupling(format!(
            "weights must be non-negative, got {w}"
        )));
    }
    Ok(())
}
