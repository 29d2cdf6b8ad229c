//! Adaptive time integration
//!
//! This module provides an embedded Runge-Kutta integrator (Cash-Karp 4(5))
//! with local error control. Each step is taken with the fourth-order
//! solution; the difference to the fifth-order solution serves as the
//! truncation error estimate that drives the step size.

use crate::error::IntegrationError;
use crate::forces::Derivative;
use log::trace;

/// Default relative error tolerance per step
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Smallest permitted step, as a fraction of the maximum step
pub const MIN_STEP_FRACTION: f64 = 1e-12;

const SAFETY: f64 = 0.9;
const MAX_INCREASE: f64 = 10.0;
const MAX_DECREASE: f64 = 10.0;

const STAGES: usize = 6;

// Cash-Karp tableau
const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 3.0 / 5.0, 1.0, 7.0 / 8.0];
const A: [[f64; 5]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [3.0 / 10.0, -9.0 / 10.0, 6.0 / 5.0, 0.0, 0.0],
    [-11.0 / 54.0, 5.0 / 2.0, -70.0 / 27.0, 35.0 / 27.0, 0.0],
    [
        1631.0 / 55296.0,
        175.0 / 512.0,
        575.0 / 13824.0,
        44275.0 / 110592.0,
        253.0 / 4096.0,
    ],
];
const B5: [f64; STAGES] = [
    37.0 / 378.0,
    0.0,
    250.0 / 621.0,
    125.0 / 594.0,
    0.0,
    512.0 / 1771.0,
];
const B4: [f64; STAGES] = [
    2825.0 / 27648.0,
    0.0,
    18575.0 / 48384.0,
    13525.0 / 55296.0,
    277.0 / 14336.0,
    1.0 / 4.0,
];

/// Step size and accuracy settings for [`AdaptiveIntegrator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorOptions {
    /// Relative error allowed per step
    pub tolerance: f64,
    /// Upper bound on any single step (s)
    pub max_step: f64,
    /// Below this step size a rejected step is a failure (s)
    pub min_step: f64,
    /// Size of the first attempted step (s)
    pub initial_step: f64,
}

impl IntegratorOptions {
    /// Options that start at, and never exceed, `max_step`
    pub fn new(max_step: f64) -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_step,
            min_step: max_step * MIN_STEP_FRACTION,
            initial_step: max_step,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step;
        self
    }
}

/// Counters for accepted and rejected trial steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Embedded Runge-Kutta 4(5) integrator with adaptive step size
///
/// Time and state only move on accepted steps. A step is never allowed to
/// carry the clock past the target handed to [`advance`](Self::advance).
///
/// # Examples
///
/// ```
/// use trajectory::integrator::{AdaptiveIntegrator, IntegratorOptions};
///
/// // dy/dt = y, y(0) = 1
/// let growth = |_t: f64, y: &[f64], dydt: &mut [f64]| dydt[0] = y[0];
/// let options = IntegratorOptions::new(0.1).with_tolerance(1e-10);
/// let mut integrator = AdaptiveIntegrator::new(vec![1.0], growth, 0.0, options);
///
/// while integrator.advance(1.0).unwrap() {}
///
/// assert_eq!(integrator.time(), 1.0);
/// assert!((integrator.state()[0] - std::f64::consts::E).abs() < 1e-7);
/// ```
pub struct AdaptiveIntegrator<D: Derivative> {
    derivative: D,
    options: IntegratorOptions,
    time: f64,
    state: Vec<f64>,
    step: f64,
    stats: Stats,
    k: [Vec<f64>; STAGES],
    stage_state: Vec<f64>,
    trial: Vec<f64>,
    error: Vec<f64>,
    scale: Vec<f64>,
}

impl<D: Derivative> AdaptiveIntegrator<D> {
    /// Creates an integrator at time `t0` with state `y0`
    pub fn new(y0: Vec<f64>, derivative: D, t0: f64, options: IntegratorOptions) -> Self {
        let n = y0.len();
        Self {
            derivative,
            options,
            time: t0,
            state: y0,
            step: options.initial_step.min(options.max_step),
            stats: Stats::default(),
            k: std::array::from_fn(|_| vec![0.0; n]),
            stage_state: vec![0.0; n],
            trial: vec![0.0; n],
            error: vec![0.0; n],
            scale: vec![0.0; n],
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Step size the next attempt will start from
    pub fn step_size(&self) -> f64 {
        self.step
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn derivative(&self) -> &D {
        &self.derivative
    }

    /// Takes one accepted adaptive step toward `not_past`
    ///
    /// Rejected trial steps are retried with a smaller step until the error
    /// estimate is within tolerance. The accepted step lands exactly on
    /// `not_past` when it reaches it.
    ///
    /// # Returns
    ///
    /// `true` while `not_past` has not been reached yet, i.e. the caller has
    /// to call again.
    ///
    /// # Errors
    ///
    /// [`IntegrationError::ToleranceNotMet`] when a trial step at the
    /// minimum step size is still rejected. State and time are left at the
    /// last accepted step.
    pub fn advance(&mut self, not_past: f64) -> Result<bool, IntegrationError> {
        let remaining = not_past - self.time;
        if remaining <= 0.0 {
            return Ok(false);
        }

        let mut h = self.step.min(self.options.max_step);
        let mut lands_on_target = h >= remaining;
        if lands_on_target {
            h = remaining;
        }

        self.derivative
            .evaluate(self.time, &self.state, &mut self.k[0]);

        let error = loop {
            let error = self.trial_step(h);
            if error <= 1.0 {
                break error;
            }

            self.stats.rejected += 1;
            trace!("rejected step of {h:e} s at t = {} (error {error:e})", self.time);
            if h <= self.options.min_step {
                return Err(IntegrationError::ToleranceNotMet {
                    time: self.time,
                    step: h,
                    error,
                });
            }

            let shrink = if error.is_finite() {
                (SAFETY * error.powf(-0.25)).max(1.0 / MAX_DECREASE)
            } else {
                1.0 / MAX_DECREASE
            };
            h = (h * shrink).max(self.options.min_step);
            lands_on_target = false;
        };

        self.stats.accepted += 1;
        std::mem::swap(&mut self.state, &mut self.trial);
        self.time = if lands_on_target {
            not_past
        } else {
            (self.time + h).min(not_past)
        };

        let grow = if error > 0.0 {
            (SAFETY * error.powf(-0.2)).min(MAX_INCREASE)
        } else {
            MAX_INCREASE
        };
        let next = (h * grow).min(self.options.max_step);
        // A step cut short by the target says nothing about the natural step
        self.step = if lands_on_target {
            next.max(self.step).min(self.options.max_step)
        } else {
            next
        };

        Ok(self.time < not_past)
    }

    /// Advances until `not_past` is reached exactly
    pub fn advance_to(&mut self, not_past: f64) -> Result<(), IntegrationError> {
        while self.advance(not_past)? {}
        Ok(())
    }

    /// Fills `trial` and `error` for a step of size `h` and returns the
    /// largest error relative to tolerance (1.0 means exactly at tolerance).
    fn trial_step(&mut self, h: f64) -> f64 {
        let n = self.state.len();

        for stage in 1..STAGES {
            let (done, rest) = self.k.split_at_mut(stage);
            for i in 0..n {
                let increment: f64 = done
                    .iter()
                    .zip(A[stage].iter())
                    .map(|(k, a)| a * k[i])
                    .sum();
                self.stage_state[i] = self.state[i] + h * increment;
            }
            self.derivative
                .evaluate(self.time + C[stage] * h, &self.stage_state, &mut rest[0]);
        }

        for i in 0..n {
            let (fourth, delta) = self
                .k
                .iter()
                .enumerate()
                .fold((0.0, 0.0), |(fourth, delta), (s, k)| {
                    (fourth + B4[s] * k[i], delta + (B5[s] - B4[s]) * k[i])
                });
            self.trial[i] = self.state[i] + h * fourth;
            self.error[i] = h * delta;
        }

        self.derivative
            .error_scale(&self.state, &self.k[0], h, &mut self.scale);

        let mut worst = 0.0_f64;
        for i in 0..n {
            let ratio = self.error[i].abs() / self.scale[i] / self.options.tolerance;
            if ratio.is_nan() || !self.trial[i].is_finite() {
                return f64::INFINITY;
            }
            worst = worst.max(ratio);
        }
        worst
    }
}
