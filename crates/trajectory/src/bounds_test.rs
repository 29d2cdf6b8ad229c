use nalgebra::Point2;

use crate::bounds::*;

#[test]
fn test_empty_points_have_no_bounds() {
    assert!(BoundingBox::new_from_points(std::iter::empty()).is_none());
}

#[test]
fn test_single_point_is_degenerate_box() {
    let p = Point2::new(1.0, -2.0);
    let bounds = BoundingBox::new_from_points([p]).unwrap();
    assert_eq!(bounds.min, p);
    assert_eq!(bounds.max, p);
    assert_eq!(bounds.width(), 0.0);
}

#[test]
fn test_box_contains_every_point() {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(-5.0, 2.0),
        Point2::new(3.0, -7.0),
        Point2::new(1.0, 9.0),
    ];
    let bounds = BoundingBox::new_from_points(points.iter().copied()).unwrap();

    for p in &points {
        assert!(bounds.contains(p));
    }
    assert_eq!(bounds.width(), 8.0);
    assert_eq!(bounds.height(), 16.0);
    assert_eq!(bounds.center(), Point2::new(-1.0, 1.0));
}

#[test]
fn test_around_is_square() {
    let bounds = BoundingBox::around(Point2::new(10.0, 20.0), 5.0);
    assert_eq!(bounds.min, Point2::new(5.0, 15.0));
    assert_eq!(bounds.max, Point2::new(15.0, 25.0));
}
