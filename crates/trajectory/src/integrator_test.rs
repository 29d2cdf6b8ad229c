use approx::assert_relative_eq;
use std::f64::consts::PI;

use crate::error::IntegrationError;
use crate::forces::{Derivative, PairwiseGravity};
use crate::integrator::{AdaptiveIntegrator, IntegratorOptions};

fn oscillator(_t: f64, y: &[f64], dydt: &mut [f64]) {
    dydt[0] = y[1];
    dydt[1] = -y[0];
}

/// Light test particle on a circular orbit of radius 1 around a unit mass (G = 1)
fn circular_orbit() -> (Vec<f64>, PairwiseGravity) {
    let y0 = vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    let gravity = PairwiseGravity::new(vec![1.0, 1e-12]).with_constant(1.0);
    (y0, gravity)
}

#[test]
fn test_advance_lands_exactly_on_target() {
    let options = IntegratorOptions::new(0.25);
    let mut integrator = AdaptiveIntegrator::new(vec![1.0, 0.0], oscillator, 0.0, options);

    let mut calls = 0;
    while integrator.advance(1.0).unwrap() {
        calls += 1;
        assert!(integrator.time() < 1.0);
    }

    assert_eq!(integrator.time(), 1.0);
    // Never more than max_step per accepted step
    assert!(calls + 1 >= 4);
}

#[test]
fn test_advance_at_target_is_a_no_op() {
    let options = IntegratorOptions::new(0.1);
    let mut integrator = AdaptiveIntegrator::new(vec![1.0, 0.0], oscillator, 2.0, options);

    assert!(!integrator.advance(2.0).unwrap());
    assert!(!integrator.advance(1.0).unwrap());
    assert_eq!(integrator.time(), 2.0);
    assert_eq!(integrator.state(), &[1.0, 0.0]);
    assert_eq!(integrator.stats().accepted, 0);
}

#[test]
fn test_step_never_exceeds_maximum() {
    let options = IntegratorOptions::new(0.05).with_tolerance(1e-3);
    let mut integrator = AdaptiveIntegrator::new(vec![1.0, 0.0], oscillator, 0.0, options);

    let mut last = integrator.time();
    while integrator.advance(3.0).unwrap() {
        assert!(integrator.time() - last <= 0.05 + 1e-15);
        assert!(integrator.step_size() <= 0.05);
        last = integrator.time();
    }
}

#[test]
fn test_oscillator_accuracy() {
    let options = IntegratorOptions::new(0.5).with_tolerance(1e-10);
    let mut integrator = AdaptiveIntegrator::new(vec![1.0, 0.0], oscillator, 0.0, options);

    integrator.advance_to(2.0 * PI).unwrap();

    assert_relative_eq!(integrator.state()[0], 1.0, epsilon = 1e-7);
    assert_relative_eq!(integrator.state()[1], 0.0, epsilon = 1e-7);
}

#[test]
fn test_tight_tolerance_takes_smaller_steps() {
    let loose = IntegratorOptions::new(1.0).with_tolerance(1e-4);
    let tight = IntegratorOptions::new(1.0).with_tolerance(1e-10);
    let mut a = AdaptiveIntegrator::new(vec![1.0, 0.0], oscillator, 0.0, loose);
    let mut b = AdaptiveIntegrator::new(vec![1.0, 0.0], oscillator, 0.0, tight);

    a.advance_to(10.0).unwrap();
    b.advance_to(10.0).unwrap();

    assert!(b.stats().accepted > a.stats().accepted);
}

#[test]
fn test_circular_orbit_returns_home() {
    let (y0, gravity) = circular_orbit();
    let options = IntegratorOptions::new(0.1).with_tolerance(1e-10);
    let mut integrator = AdaptiveIntegrator::new(y0, gravity, 0.0, options);

    integrator.advance_to(2.0 * PI).unwrap();

    let y = integrator.state();
    assert_relative_eq!(y[4], 1.0, epsilon = 1e-6);
    assert_relative_eq!(y[5], 0.0, epsilon = 1e-6);
}

#[test]
fn test_orbit_conserves_energy() {
    let (y0, gravity) = circular_orbit();
    let kinetic = |y: &[f64]| 0.5 * 1e-12 * (y[6] * y[6] + y[7] * y[7]);
    let initial = kinetic(&y0) + gravity.potential_energy(&y0);

    let options = IntegratorOptions::new(0.1).with_tolerance(1e-10);
    let mut integrator = AdaptiveIntegrator::new(y0, gravity, 0.0, options);
    integrator.advance_to(20.0).unwrap();

    let y = integrator.state().to_vec();
    let fin = kinetic(&y) + integrator.derivative().potential_energy(&y);
    let drift = ((fin - initial) / initial).abs();
    assert!(drift < 1e-6, "Energy drift: {:.2e}", drift);
}

#[test]
fn test_unsatisfiable_tolerance_fails() {
    let broken = |_t: f64, _y: &[f64], dydt: &mut [f64]| dydt[0] = f64::NAN;
    let options = IntegratorOptions::new(1.0);
    let mut integrator = AdaptiveIntegrator::new(vec![1.0], broken, 0.0, options);

    let result = integrator.advance(1.0);

    match result {
        Err(IntegrationError::ToleranceNotMet { time, step, .. }) => {
            assert_eq!(time, 0.0);
            assert!(step <= options.min_step);
        }
        other => panic!("expected a tolerance failure, got {:?}", other),
    }
    // Nothing was accepted
    assert_eq!(integrator.time(), 0.0);
    assert_eq!(integrator.state(), &[1.0]);
}

#[test]
fn test_default_error_scale_is_componentwise() {
    let mut scale = [0.0; 2];
    oscillator.error_scale(&[2.0, -1.0], &[-1.0, -2.0], 0.5, &mut scale);

    assert_eq!(scale, [2.5, 2.0]);
}
