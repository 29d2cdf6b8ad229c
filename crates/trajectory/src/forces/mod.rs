//! Derivative functions for the trajectory integrator
//!
//! The integrator works on a flat state vector holding four scalars per
//! body (x, y, vx, vy). A `Derivative` maps that vector to its time
//! derivative; `PairwiseGravity` is the one the engine uses.

use crate::body::Body;
use nalgebra::{Point2, Vector2};

pub mod gravity;


pub use gravity::PairwiseGravity;

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.67408e-11;

/// Scalars per body in the flattened state (x, y, vx, vy)
pub const STATE_STRIDE: usize = 4;

/// Right-hand side of an ordinary differential equation `dy/dt = f(t, y)`
///
/// # Examples
///
/// ```
/// use trajectory::forces::Derivative;
///
/// // Closures work too: simple harmonic oscillator
/// let oscillator = |_t: f64, y: &[f64], dydt: &mut [f64]| {
///     dydt[0] = y[1];
///     dydt[1] = -y[0];
/// };
///
/// let mut dydt = [0.0; 2];
/// oscillator.evaluate(0.0, &[1.0, 0.0], &mut dydt);
/// assert_eq!(dydt, [0.0, -1.0]);
/// ```
pub trait Derivative {
    /// Writes `dy/dt` at time `t` into `dydt` (same length as `y`)
    fn evaluate(&self, t: f64, y: &[f64], dydt: &mut [f64]);

    /// Per-component magnitudes the integrator measures relative error against
    ///
    /// The default is the classic `|y| + |h dy/dt|` scale, component by
    /// component.
    fn error_scale(&self, y: &[f64], dydt: &[f64], step: f64, scale: &mut [f64]) {
        for ((s, y), d) in scale.iter_mut().zip(y).zip(dydt) {
            *s = (y.abs() + (step * d).abs()).max(f64::MIN_POSITIVE);
        }
    }
}

impl<F> Derivative for F
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    fn evaluate(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
        self(t, y, dydt)
    }
}

/// Flattens the latest sample of every body into an integrator state
pub fn pack_state(bodies: &[Body]) -> Vec<f64> {
    bodies
        .iter()
        .flat_map(|body| {
            let s = body.latest();
            [s.position.x, s.position.y, s.velocity.x, s.velocity.y]
        })
        .collect()
}

/// Reads position and velocity of body `index` back out of a flat state
pub fn unpack_body(y: &[f64], index: usize) -> (Point2<f64>, Vector2<f64>) {
    let k = index * STATE_STRIDE;
    (
        Point2::new(y[k], y[k + 1]),
        Vector2::new(y[k + 2], y[k + 3]),
    )
}
