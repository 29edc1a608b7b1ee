//! Property tests for the spin-system invariants.

use proptest::prelude::*;
use u_ising::anneal::{AnnealConfig, Annealer, BetaSchedule, EnergyEvaluation};
use u_ising::spin::{CouplingMatrix, Spin, SpinSystem};

fn assert_spin_domain(system: &SpinSystem) {
    for v in system.spin_values() {
        assert!(v == 1.0 || v == -1.0, "spin value {v} outside {{-1, +1}}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn construction_is_deterministic(n in 1usize..40, seed in any::<u64>()) {
        let a = SpinSystem::new(n, seed).unwrap();
        let b = SpinSystem::new(n, seed).unwrap();
        prop_assert_eq!(a.energy().to_bits(), b.energy().to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn anneal_is_deterministic(
        n in 1usize..24,
        seed in any::<u64>(),
        steps in 0usize..60,
        anneal_seed in any::<u64>(),
    ) {
        let mut a = SpinSystem::new(n, seed).unwrap();
        let mut b = SpinSystem::new(n, seed).unwrap();
        let ea = a.anneal(steps, anneal_seed);
        let eb = b.anneal(steps, anneal_seed);
        prop_assert_eq!(ea.to_bits(), eb.to_bits());
        prop_assert_eq!(a.spins(), b.spins());
    }

    #[test]
    fn spins_stay_in_domain(n in 1usize..24, seed in any::<u64>(), rounds in 1usize..4) {
        let mut system = SpinSystem::new(n, seed).unwrap();
        assert_spin_domain(&system);
        for r in 0..rounds {
            system.anneal(30, seed.wrapping_add(r as u64));
            assert_spin_domain(&system);
        }
        system.add_thermal_noise(1.5, seed).unwrap();
        assert_spin_domain(&system);
    }

    #[test]
    fn coupling_symmetry_survives_perturbation(
        n in 1usize..30,
        seed in any::<u64>(),
        factor in 0.0f64..10.0,
        magnitude in 0.0f64..2.0,
        strength in -5.0f64..5.0,
    ) {
        let mut system = SpinSystem::new(n, seed).unwrap();
        prop_assert!(system.coupling().is_symmetric());

        system.scale_coupling(factor).unwrap();
        prop_assert!(system.coupling().is_symmetric());

        system.jitter_coupling(magnitude, seed).unwrap();
        prop_assert!(system.coupling().is_symmetric());

        system.introduce_external_field(strength).unwrap();
        system.add_thermal_noise(0.5, seed).unwrap();
        if n >= 2 {
            system.set_coupling(0, n - 1, 2.0).unwrap();
            prop_assert_eq!(system.coupling().get(n - 1, 0), 2.0);
        }
        prop_assert!(system.coupling().is_symmetric());

        for i in 0..n {
            for j in 0..n {
                prop_assert!(system.coupling().get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn extreme_perturbations_keep_invariants(
        n in 2usize..16,
        seed in any::<u64>(),
        factor in prop_oneof![0.0f64..10.0, 1e300f64..f64::MAX],
        magnitude in prop_oneof![0.0f64..2.0, 1e300f64..f64::MAX],
        strength in prop_oneof![-5.0f64..5.0, 1e300f64..f64::MAX, -f64::MAX..-1e300f64],
        rounds in 1usize..4,
    ) {
        let mut system = SpinSystem::new(n, seed).unwrap();
        for r in 0..rounds {
            let before = system.clone();
            if system.scale_coupling(factor).is_err() {
                prop_assert_eq!(&system, &before);
            }
            let before = system.clone();
            if system.jitter_coupling(magnitude, seed.wrapping_add(r as u64)).is_err() {
                prop_assert_eq!(&system, &before);
            }
            let before = system.clone();
            if system.introduce_external_field(strength).is_err() {
                prop_assert_eq!(&system, &before);
            }

            prop_assert!(system.coupling().is_symmetric());
            for i in 0..n {
                prop_assert!(system.field()[i].is_finite());
                for j in 0..n {
                    let w = system.coupling().get(i, j);
                    prop_assert!(w.is_finite() && w >= 0.0, "weight ({}, {}) = {}", i, j, w);
                }
            }
        }
        system.anneal(10, seed);
        prop_assert!(!system.energy().is_nan());
        assert_spin_domain(&system);
    }

    #[test]
    fn incremental_delta_agrees_with_full(n in 2usize..30, seed in any::<u64>(), i in 0usize..30) {
        let mut system = SpinSystem::new(n, seed).unwrap();
        system.jitter_coupling(0.7, seed).unwrap();
        let i = i % n;
        let before = system.energy();
        let predicted = system.flip_delta(i).unwrap();
        system.flip(i).unwrap();
        prop_assert!((system.energy() - before - predicted).abs() < 1e-9);
    }
}

#[test]
fn extreme_values_stay_finite() {
    let n = 16;
    let mut coupling = CouplingMatrix::parity_rule(n);
    coupling.scale(1e100).unwrap();
    let field: Vec<f64> = (0..n)
        .map(|i| if i % 2 == 0 { 1e100 } else { -1e100 })
        .collect();
    let spins: Vec<Spin> = (0..n)
        .map(|i| if i % 3 == 0 { Spin::Up } else { Spin::Down })
        .collect();
    let mut system = SpinSystem::from_parts(spins, coupling, field).unwrap();

    assert!(system.energy().is_finite());
    let e = system.anneal(200, 1);
    assert!(e.is_finite(), "energy {e}");
    assert!(!system.energy().is_nan());
}

#[test]
fn extreme_beta_stays_finite() {
    let mut system = SpinSystem::new(20, 3).unwrap();
    let config = AnnealConfig::new(100, 3).with_schedule(BetaSchedule::Exponential {
        initial: 1e-3,
        rate: 700.0,
    });
    let result = Annealer::run(&mut system, &config).unwrap();
    assert!(result.final_energy.is_finite());
    assert!(result.energy_history.iter().all(|e| e.is_finite()));
}

#[test]
fn reference_scenario() {
    let mut system = SpinSystem::new(20, 42).unwrap();
    assert_spin_domain(&system);
    let e0 = system.energy();
    system.anneal(200, 42);
    let e1 = system.energy();
    assert!(e1 <= e0, "expected {e1} <= {e0}");
}

#[test]
fn annealing_lowers_energy_for_most_seeds() {
    let improved = (0..20u64)
        .filter(|&seed| {
            let mut system = SpinSystem::new(20, seed).unwrap();
            let before = system.energy();
            let after = system.anneal(200, seed);
            after < before
        })
        .count();
    assert!(improved >= 16, "only {improved}/20 seeds improved");
}

#[test]
fn full_and_incremental_reach_similar_energies() {
    let mut full = SpinSystem::new(20, 8).unwrap();
    let mut incremental = full.clone();
    let full_result = Annealer::run(&mut full, &AnnealConfig::new(200, 8)).unwrap();
    let inc_result = Annealer::run(
        &mut incremental,
        &AnnealConfig::new(200, 8).with_evaluation(EnergyEvaluation::Incremental),
    )
    .unwrap();
    // Both settle near the aligned ground state.
    let ground = -full.coupling().pair_sum();
    assert!(full_result.final_energy < ground / 2.0);
    assert!(inc_result.final_energy < ground / 2.0);
}
