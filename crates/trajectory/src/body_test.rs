use nalgebra::{Point2, Vector2};
use units::{Length, Mass};

use crate::body::{Body, Sample};

fn craft() -> Body {
    Body::new(
        "Craft",
        2.0,
        1.0,
        Point2::new(0.0, 0.0),
        Vector2::new(3.0, 4.0),
        0.0,
    )
}

fn sample(t: f64) -> Sample {
    Sample::new(t, Point2::new(t, 0.0), Vector2::new(1.0, 0.0))
}

fn with_future(times: &[f64]) -> Body {
    let mut body = craft();
    for &t in times {
        body.push_sample(sample(t));
    }
    body
}

#[test]
fn test_new_body_has_single_sample() {
    let earth = Body::new(
        "Earth",
        Mass::from_earth_masses(1.0).to_kg(),
        Length::from_earth_radii(1.0).to_m(),
        Point2::new(0.0, 152.10e9),
        Vector2::new(-29.29e3, 0.0),
        10.0,
    );

    assert_eq!(earth.future_len(), 1);
    assert!(earth.at_final_sample());
    assert_eq!(earth.current().time, 10.0);
    assert_eq!(earth.latest(), earth.current());
    assert!(!earth.is_draft);
    assert_eq!(earth.applied_acceleration, Vector2::zeros());
}

#[test]
fn test_momentum_and_kinetic_energy() {
    let body = craft();
    assert_eq!(body.momentum(), Vector2::new(6.0, 8.0));
    assert_eq!(body.kinetic_energy(), 25.0);
}

#[test]
fn test_distance_to() {
    let a = craft();
    let b = Body::new("b", 1.0, 1.0, Point2::new(3.0, 4.0), Vector2::zeros(), 0.0);
    assert_eq!(a.distance_to(&b), 5.0);
}

#[test]
fn test_future_is_time_ordered() {
    let body = with_future(&[1.0, 2.0, 3.0]);
    let times: Vec<f64> = body.future().map(|s| s.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(body.latest().time, 3.0);
}

#[test]
fn test_consume_moves_samples_to_history() {
    let mut body = with_future(&[1.0, 2.0, 3.0]);

    assert!(body.consume_until(1.5));
    assert_eq!(body.current().time, 2.0);
    let consumed: Vec<f64> = body.history().iter().map(|s| s.time).collect();
    assert_eq!(consumed, vec![0.0, 1.0]);
}

#[test]
fn test_consume_stops_at_target_sample() {
    let mut body = with_future(&[1.0, 2.0]);
    assert!(body.consume_until(1.0));
    assert_eq!(body.current().time, 1.0);
    assert_eq!(body.history().len(), 1);
}

#[test]
fn test_consume_past_end_keeps_final_sample() {
    let mut body = with_future(&[1.0, 2.0]);
    assert!(!body.consume_until(10.0));
    assert_eq!(body.current().time, 2.0);
    assert!(body.at_final_sample());
    assert_eq!(body.history().len(), 2);
}

#[test]
fn test_truncate_future() {
    let mut body = with_future(&[1.0, 2.0]);
    body.truncate_future();
    assert_eq!(body.future_len(), 1);
    assert_eq!(body.current().time, 0.0);
}

#[test]
fn test_fork_starts_from_latest() {
    let mut body = with_future(&[1.0, 2.0]).into_draft();
    body.consume_until(1.0);

    let fork = body.fork();
    assert_eq!(fork.current().time, 2.0);
    assert!(fork.at_final_sample());
    assert!(fork.history().is_empty());
    assert!(fork.is_draft);
    assert_eq!(fork.name, body.name);
}

#[test]
fn test_trail_carries_over_without_duplicates() {
    let mut old = with_future(&[1.0, 2.0]);
    assert!(!old.consume_until(5.0));
    let mut successor = old.fork();
    successor.push_sample(sample(3.0));

    successor.inherit_trail(old.into_trail());
    assert!(successor.consume_until(3.0));

    let times: Vec<f64> = successor.history().iter().map(|s| s.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
}
