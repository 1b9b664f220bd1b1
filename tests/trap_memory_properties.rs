//! Behavioural properties of the trap-memory experiment

use trapmem_rs::experiment::{Integrator, TrapMemoryConfig, TrapMemoryExperiment};
use trapmem_rs::models::StepRegime;

mod common;
use common::run_trap;

fn in_unit_interval(values: &[f64]) -> bool {
    values.iter().all(|f| (0.0..=1.0).contains(f))
}

#[test]
fn test_reference_run_shape() {
    let run = run_trap(&TrapMemoryConfig::default());

    assert_eq!(run.len(), 4000);
    assert_eq!(run.split_index, 2000);
    assert_eq!(run.time[0], 0.0);
    assert_eq!(run.time[3999], 20.0);
    assert_eq!(run.occupancy[0], 0.05);
    assert!(in_unit_interval(&run.occupancy));
    assert!(run.stability.is_monotone());
    assert_eq!(run.diagnostics.clamped_steps, 0);
}

#[test]
fn test_occupancy_stays_in_unit_interval_on_coarse_grids() {
    for samples in [2, 3, 5, 20, 50] {
        for integrator in [Integrator::ForwardEuler, Integrator::RungeKutta4] {
            let config = TrapMemoryConfig::default()
                .with_samples(samples)
                .with_rates(5e-17, 2.0)
                .with_integrator(integrator);
            let run = run_trap(&config);

            assert!(in_unit_interval(&run.occupancy), "{} samples, {}", samples, integrator);
        }
    }
}

#[test]
fn test_density_is_monotone_on_each_leg() {
    for samples in [4000, 101, 7] {
        let run = run_trap(&TrapMemoryConfig::default().with_samples(samples));
        let split = run.split_index;

        assert!(run.log_density[..split].windows(2).all(|w| w[1] >= w[0]));
        assert!(run.log_density[split..].windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(run.log_density[split], 17.0);
        assert_eq!(*run.log_density.last().unwrap(), 14.0);
    }
}

#[test]
fn test_odd_median_sample_belongs_to_falling_leg() {
    let run = run_trap(&TrapMemoryConfig::default().with_samples(5));

    assert_eq!(run.split_index, 2);
    assert_eq!(run.log_density, vec![14.0, 17.0, 17.0, 15.5, 14.0]);
}

#[test]
fn test_pure_emission_decays_geometrically() {
    let config = TrapMemoryConfig::default()
        .with_samples(200)
        .with_rates(0.0, 0.4)
        .with_initial_occupancy(0.8);
    let run = run_trap(&config);
    let dt = 20.0 / 199.0;

    for w in run.occupancy.windows(2) {
        let expected = w[0] * (1.0 - 0.4 * dt);
        assert!((w[1] - expected).abs() <= 1e-15 * w[0].max(1e-300), "{} vs {}", w[1], expected);
    }
}

#[test]
fn test_pure_capture_fills_monotonically() {
    let config = TrapMemoryConfig::default().with_rates(5e-18, 0.0);
    let run = run_trap(&config);

    assert!(run.occupancy.windows(2).all(|w| w[1] >= w[0]));
    assert!(run.occupancy.iter().all(|f| *f <= 1.0));
    // ∫kc·n dt ≈ 1.45 over the sweep, so 1 − f ends near 0.95·exp(−1.45)
    let f_end = run.final_occupancy().unwrap();
    assert!(f_end > 0.75 && f_end < 0.8, "{}", f_end);
}

#[test]
fn test_falling_leg_remembers_higher_density() {
    let run = run_trap(&TrapMemoryConfig::default());
    let hysteresis = run.hysteresis().unwrap();

    let rising = hysteresis.rising_at(16.0).unwrap();
    let falling = hysteresis.falling_at(16.0).unwrap();

    assert!(falling > rising, "falling {} vs rising {}", falling, rising);
    assert!(hysteresis.gap_at(16.0).unwrap() > 0.0);
    assert!(hysteresis.area() > 0.0);
    assert!(!hysteresis.is_degenerate(1e-3));
}

#[test]
fn test_reruns_are_bit_identical() {
    for integrator in [Integrator::ForwardEuler, Integrator::RungeKutta4] {
        let config = TrapMemoryConfig::default().with_samples(1000).with_integrator(integrator);

        let first = run_trap(&config);
        let second = run_trap(&config);
        assert_eq!(first, second);
    }
}

#[test]
fn test_two_samples_take_one_euler_step() {
    let (kc, ke, f0) = (5e-18, 0.4, 0.05);
    let config = TrapMemoryConfig::default().with_samples(2).with_duration(1.0);
    let run = run_trap(&config);

    let n0 = 10f64.powf(14.0);
    let dt = 1.0;
    let expected = f0 + dt * (kc * n0 * (1.0 - f0) - ke * f0);

    assert_eq!(run.time, vec![0.0, 1.0]);
    assert_eq!(run.occupancy[1], expected);
}

#[test]
fn test_single_sample_run() {
    let run = run_trap(&TrapMemoryConfig::default().with_samples(1));

    assert_eq!(run.len(), 1);
    assert_eq!(run.time, vec![0.0]);
    assert_eq!(run.occupancy, vec![0.05]);
    assert_eq!(run.stability.steps, 0);
    assert!(run.stability.is_monotone());
}

#[test]
fn test_large_step_is_flagged_not_rejected() {
    let config = TrapMemoryConfig::default()
        .with_samples(20)
        .with_rates(5e-17, 0.4);
    let run = run_trap(&config);

    // dt = 20/19 s, kc·n reaches 5 s⁻¹ at the peak
    assert!(run.stability.max_step_factor > 2.0);
    assert_eq!(run.stability.regime(), StepRegime::Divergent);
    assert!(!run.stability.is_stable());
    assert!(run.stability.divergent_steps > 0);
    assert!(in_unit_interval(&run.occupancy));
}

#[test]
fn test_invalid_config_fails_before_running() {
    let config = TrapMemoryConfig::default().with_initial_occupancy(-0.1);
    assert!(TrapMemoryExperiment::run(&config).is_err());
}
