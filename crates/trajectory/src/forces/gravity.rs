//! Direct pairwise gravity (O(N²))

use crate::body::Body;
use crate::forces::{Derivative, G, STATE_STRIDE};
use nalgebra::Vector2;

/// Inverse-square attraction between every pair of bodies
///
/// No softening is applied, so two bodies approaching the same point produce
/// unbounded accelerations. The collision merger is expected to combine them
/// first; close flybys still force the integrator down to small steps.
///
/// # Examples
///
/// ```
/// use trajectory::forces::{Derivative, PairwiseGravity, G};
///
/// // Two 1 kg masses 1 m apart, at rest
/// let gravity = PairwiseGravity::new(vec![1.0, 1.0]);
/// let y = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
/// let mut dydt = [0.0; 8];
/// gravity.evaluate(0.0, &y, &mut dydt);
///
/// // Each is pulled toward the other
/// assert_eq!(dydt[2], G);
/// assert_eq!(dydt[6], -G);
/// ```
#[derive(Debug, Clone)]
pub struct PairwiseGravity {
    masses: Vec<f64>,
    applied: Vec<Vector2<f64>>,
    /// Gravitational constant in m³ kg⁻¹ s⁻²
    pub constant: f64,
}

impl PairwiseGravity {
    /// Gravity between bodies of the given masses (kg) with no external forces
    pub fn new(masses: Vec<f64>) -> Self {
        let applied = vec![Vector2::zeros(); masses.len()];
        Self {
            masses,
            applied,
            constant: G,
        }
    }

    /// Gravity over a body set, in body order, including applied accelerations
    pub fn from_bodies(bodies: &[Body]) -> Self {
        Self {
            masses: bodies.iter().map(|b| b.mass).collect(),
            applied: bodies.iter().map(|b| b.applied_acceleration).collect(),
            constant: G,
        }
    }

    /// Overrides the gravitational constant (useful for dimensionless tests)
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn body_count(&self) -> usize {
        self.masses.len()
    }

    /// Total gravitational potential energy of a flat state, each pair once
    pub fn potential_energy(&self, y: &[f64]) -> f64 {
        let n = self.masses.len();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| {
                let (a, b) = (i * STATE_STRIDE, j * STATE_STRIDE);
                let r = ((y[b] - y[a]).powi(2) + (y[b + 1] - y[a + 1]).powi(2)).sqrt();
                -self.constant * self.masses[i] * self.masses[j] / r
            })
            .sum()
    }
}

impl Derivative for PairwiseGravity {
    fn evaluate(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        let n = self.masses.len();
        debug_assert_eq!(y.len(), n * STATE_STRIDE);

        for i in 0..n {
            let k = i * STATE_STRIDE;
            dydt[k] = y[k + 2];
            dydt[k + 1] = y[k + 3];

            let mut accel = self.applied[i];
            for (j, &mass) in self.masses.iter().enumerate() {
                if j == i {
                    continue;
                }
                let m = j * STATE_STRIDE;
                let dx = y[m] - y[k];
                let dy = y[m + 1] - y[k + 1];
                let r2 = dx * dx + dy * dy;
                let common = self.constant * mass / (r2 * r2.sqrt());
                accel.x += common * dx;
                accel.y += common * dy;
            }

            dydt[k + 2] = accel.x;
            dydt[k + 3] = accel.y;
        }
    }

    /// Scales position errors by the extent of the whole system and velocity
    /// errors by the fastest body, so a body resting at the origin does not
    /// demand absolute precision.
    fn error_scale(&self, y: &[f64], dydt: &[f64], step: f64, scale: &mut [f64]) {
        let mut position = 0.0_f64;
        let mut velocity = 0.0_f64;
        let mut acceleration = 0.0_f64;
        for (state, rate) in y
            .chunks_exact(STATE_STRIDE)
            .zip(dydt.chunks_exact(STATE_STRIDE))
        {
            position = position.max(state[0].abs()).max(state[1].abs());
            velocity = velocity.max(state[2].abs()).max(state[3].abs());
            acceleration = acceleration.max(rate[2].abs()).max(rate[3].abs());
        }

        let position_scale = (position + (step * velocity).abs()).max(f64::MIN_POSITIVE);
        let velocity_scale = (velocity + (step * acceleration).abs()).max(f64::MIN_POSITIVE);
        for (i, s) in scale.iter_mut().enumerate() {
            *s = if i % STATE_STRIDE < 2 {
                position_scale
            } else {
                velocity_scale
            };
        }
    }
}
