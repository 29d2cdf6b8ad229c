//! Perfectly inelastic merging and the epoch split that follows it

use crate::body::Body;
use crate::collisions::CollisionEvent;
use crate::epoch::{Epoch, MergeOrigin};
use log::debug;
use nalgebra::{Point2, Vector2};

/// Name given to the body formed from `a` and `b`
pub fn merged_name(a: &str, b: &str) -> String {
    format!("{a} + {b}")
}

/// Merges two bodies at their latest samples
///
/// The merged body conserves:
/// - Total mass: m = m_a + m_b
/// - Momentum: v = (m_a v_a + m_b v_b) / m
/// - Centre of mass: p = (m_a p_a + m_b p_b) / m
///
/// Radii add linearly. The result starts a fresh trajectory at the
/// collision time, is never a draft, and has no applied acceleration.
///
/// # Examples
///
/// ```
/// use trajectory::body::Body;
/// use trajectory::collisions::merge_bodies;
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new("a", 1.0, 2.0, Point2::new(0.0, 0.0), Vector2::new(0.0, 5.0), 0.0);
/// let b = Body::new("b", 3.0, 1.0, Point2::new(4.0, 0.0), Vector2::new(0.0, 1.0), 0.0);
///
/// let merged = merge_bodies(&a, &b, "a + b");
///
/// assert_eq!(merged.mass, 4.0);
/// assert_eq!(merged.radius, 3.0);
/// assert_eq!(merged.current().position, Point2::new(3.0, 0.0));
/// assert_eq!(merged.current().velocity, Vector2::new(0.0, 2.0));
/// ```
pub fn merge_bodies(a: &Body, b: &Body, name: impl Into<String>) -> Body {
    let sa = a.latest();
    let sb = b.latest();
    let total_mass = a.mass + b.mass;

    let position: Point2<f64> =
        Point2::from((sa.position.coords * a.mass + sb.position.coords * b.mass) / total_mass);
    let velocity: Vector2<f64> = (sa.velocity * a.mass + sb.velocity * b.mass) / total_mass;

    Body::new(
        name,
        total_mass,
        a.radius + b.radius,
        position,
        velocity,
        sa.time,
    )
}

/// Ends `epoch` at the collision described by `event` and builds the
/// epoch that follows it.
///
/// Every body not involved continues from its latest sample; the merged
/// body is appended last. The old epoch keeps its samples, including the
/// collision sample.
pub fn split_epoch(epoch: &Epoch, event: &CollisionEvent) -> (Vec<Body>, MergeOrigin) {
    let bodies = epoch.bodies();
    let a = &bodies[event.first];
    let b = &bodies[event.second];

    let name = epoch.unique_name(&merged_name(&a.name, &b.name));
    let merged = merge_bodies(a, b, name.clone());

    debug!(
        "{} and {} merge into {} at t={:.1} s (separation {:.3e} m)",
        a.name, b.name, name, event.time, event.separation
    );

    let mut next: Vec<Body> = bodies
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != event.first && *i != event.second)
        .map(|(_, body)| body.fork())
        .collect();
    next.push(merged);

    let origin = MergeOrigin {
        time: event.time,
        removed: [a.name.clone(), b.name.clone()],
        merged: name,
    };

    (next, origin)
}

