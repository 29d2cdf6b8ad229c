//! Sphere overlap tests over the latest samples of an epoch

use crate::body::Body;

/// A detected overlap between two bodies of the same epoch
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Index of the first body, always lower than `second`
    pub first: usize,
    pub second: usize,
    /// Time of the samples that overlapped (s)
    pub time: f64,
    /// Centre-to-centre distance (m)
    pub separation: f64,
    /// Sum of the two radii (m)
    pub contact_distance: f64,
}

/// Scans pairs `i < j` in index order and returns the first pair whose
/// latest samples touch or overlap.
///
/// Only one collision is reported per call; the caller splits the epoch
/// and looks again in the next one.
///
/// # Examples
///
/// ```
/// use trajectory::body::Body;
/// use trajectory::collisions::find_first_overlap;
/// use nalgebra::{Point2, Vector2};
///
/// let bodies = vec![
///     Body::new("a", 1.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros(), 0.0),
///     Body::new("b", 1.0, 1.0, Point2::new(1.5, 0.0), Vector2::zeros(), 0.0),
/// ];
///
/// let event = find_first_overlap(&bodies).unwrap();
/// assert_eq!((event.first, event.second), (0, 1));
/// ```
pub fn find_first_overlap(bodies: &[Body]) -> Option<CollisionEvent> {
    for (i, a) in bodies.iter().enumerate() {
        let pa = a.latest();
        for (offset, b) in bodies[i + 1..].iter().enumerate() {
            let pb = b.latest();
            let separation = (pa.position - pb.position).magnitude();
            let contact_distance = a.radius + b.radius;

            if separation <= contact_distance {
                return Some(CollisionEvent {
                    first: i,
                    second: i + 1 + offset,
                    time: pa.time,
                    separation,
                    contact_distance,
                });
            }
        }
    }

    None
}
