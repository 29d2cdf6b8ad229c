//! Axis-aligned extents of trajectories, used to frame a view

use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// A rectangle in simulation coordinates (m)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum corner (bottom-left)
    pub min: Point2<f64>,
    /// Maximum corner (top-right)
    pub max: Point2<f64>,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` when there are none
    ///
    /// # Examples
    ///
    /// ```
    /// use trajectory::bounds::BoundingBox;
    /// use nalgebra::Point2;
    ///
    /// let points = [Point2::new(-2.0, -1.0), Point2::new(3.0, 4.0)];
    /// let bounds = BoundingBox::new_from_points(points).unwrap();
    ///
    /// assert_eq!(bounds.min, Point2::new(-2.0, -1.0));
    /// assert_eq!(bounds.max, Point2::new(3.0, 4.0));
    /// ```
    pub fn new_from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => Self { min: p, max: p },
                Some(Self { min, max }) => Self {
                    min: Point2::new(min.x.min(p.x), min.y.min(p.y)),
                    max: Point2::new(max.x.max(p.x), max.y.max(p.y)),
                },
            })
        })
    }

    /// Square box of half-size `half_size` around `center`
    pub fn around(center: Point2<f64>, half_size: f64) -> Self {
        let offset = Vector2::new(half_size, half_size);
        Self {
            min: center - offset,
            max: center + offset,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}
