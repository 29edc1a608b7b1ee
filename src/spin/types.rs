//! The two-valued spin.

/// A single Ising spin, either +1 or -1.
///
/// Holding spins as an enum rather than a float keeps every configuration
/// inside {-1, +1} no matter how it is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// Numeric value: `+1.0` or `-1.0`.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Spin::Up => 1.0,
            Spin::Down => -1.0,
        }
    }

    /// The opposite orientation.
    #[inline]
    pub fn flipped(self) -> Spin {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }

    /// Maps a sign to a spin. Non-negative values (including `-0.0`) map to `Up`.
    ///
    /// Returns `None` for NaN.
    pub fn from_sign(x: f64) -> Option<Spin> {
        if x.is_nan() {
            None
        } else if x >= 0.0 {
            Some(Spin::Up)
        } else {
            Some(Spin::Down)
        }
    }
}

impl From<Spin> for f64 {
    fn from(s: Spin) -> f64 {
        s.value()
    }
}
