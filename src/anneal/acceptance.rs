//! Acceptance rule.

/// Boltzmann factor `exp(min(-beta * delta_e, clamp))`.
///
/// The exponent is saturated at `clamp` before exponentiating, so the result
/// is finite for any finite `clamp`. A NaN exponent (NaN `delta_e`, or zero
/// `beta` against an infinite `delta_e`) yields 0.
#[inline]
pub fn boltzmann_term(delta_e: f64, beta: f64, clamp: f64) -> f64 {
    let arg = -beta * delta_e;
    if arg.is_nan() {
        return 0.0;
    }
    arg.min(clamp).exp()
}

/// Minimum acceptance probability `floor / (1 + beta)`.
#[inline]
pub fn tunneling_floor(beta: f64, floor: f64) -> f64 {
    floor / (1.0 + beta)
}

/// Probability of accepting a move with energy change `delta_e`.
///
/// Values at or above 1 mean the move is always accepted.
///
/// ```
/// use u_ising::anneal::acceptance_probability;
///
/// // Downhill moves are always accepted.
/// assert!(acceptance_probability(-1.0, 2.0, 0.1, 500.0) >= 1.0);
/// // Steep uphill moves fall back to the floor.
/// let p = acceptance_probability(1e6, 4.0, 0.1, 500.0);
/// assert!((p - 0.02).abs() < 1e-12);
/// ```
#[inline]
pub fn acceptance_probability(delta_e: f64, beta: f64, floor: f64, clamp: f64) -> f64 {
    boltzmann_term(delta_e, beta, clamp).max(tunneling_floor(beta, floor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_prevents_overflow() {
        let p = boltzmann_term(-1e308, 1e10, 500.0);
        assert!(p.is_finite());
        assert_eq!(p, 500.0f64.exp());
    }

    #[test]
    fn test_infinite_delta() {
        assert_eq!(boltzmann_term(f64::INFINITY, 1.0, 500.0), 0.0);
        assert_eq!(boltzmann_term(f64::NEG_INFINITY, 1.0, 500.0), 500.0f64.exp());
    }

    #[test]
    fn test_nan_exponent_is_zero() {
        assert_eq!(boltzmann_term(f64::NAN, 1.0, 500.0), 0.0);
        assert_eq!(boltzmann_term(f64::INFINITY, 0.0, 500.0), 0.0);
        // Only the floor remains.
        let p = acceptance_probability(f64::NAN, 1.0, 0.1, 500.0);
        assert!((p - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_metropolis_region() {
        let p = acceptance_probability(1.0, 1.0, 0.1, 500.0);
        assert!((p - (-1.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_floor_dominates_at_low_temperature() {
        let beta = 100.0;
        let p = acceptance_probability(5.0, beta, 0.1, 500.0);
        assert!((p - 0.1 / 101.0).abs() < 1e-15);
    }

    #[test]
    fn test_zero_floor_is_plain_metropolis() {
        assert_eq!(acceptance_probability(50.0, 100.0, 0.0, 500.0), (-5000.0f64).exp());
    }
}
