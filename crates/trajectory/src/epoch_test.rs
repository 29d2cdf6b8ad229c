use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, Sample};
use crate::epoch::*;
use crate::error::EngineError;

fn body(name: &str, mass: f64, vx: f64) -> Body {
    Body::new(
        name,
        mass,
        1.0,
        Point2::new(0.0, 0.0),
        Vector2::new(vx, 0.0),
        0.0,
    )
}

fn advance(epoch: &mut Epoch, times: &[f64]) {
    for body in epoch.bodies_mut() {
        for &t in times {
            let s = *body.latest();
            body.push_sample(Sample::new(t, s.position, s.velocity));
        }
    }
}

#[test]
fn test_empty_epoch_is_rejected() {
    assert!(matches!(
        Epoch::new(Vec::new()),
        Err(EngineError::InconsistentTimelineState(_))
    ));
}

#[test]
fn test_totals() {
    let epoch = Epoch::new(vec![body("a", 2.0, 3.0), body("b", 1.0, -4.0)]).unwrap();
    assert_relative_eq!(epoch.total_mass(), 3.0);
    assert_relative_eq!(epoch.total_momentum().x, 2.0);
    assert_eq!(epoch.len(), 2);
}

#[test]
fn test_find_and_contains() {
    let epoch = Epoch::new(vec![body("a", 1.0, 0.0), body("b", 1.0, 0.0)]).unwrap();
    assert!(epoch.contains("b"));
    assert!(!epoch.contains("c"));
    assert_eq!(epoch.find("a").map(|b| b.mass), Some(1.0));
}

#[test]
fn test_unique_name() {
    let epoch = Epoch::new(vec![body("x", 1.0, 0.0), body("x (2)", 1.0, 0.0)]).unwrap();
    assert_eq!(epoch.unique_name("y"), "y");
    assert_eq!(epoch.unique_name("x"), "x (3)");
}

#[test]
fn test_consume_reports_exhaustion() {
    let mut epoch = Epoch::new(vec![body("a", 1.0, 0.0), body("b", 1.0, 0.0)]).unwrap();
    advance(&mut epoch, &[1.0, 2.0]);

    assert!(epoch.consume_until(1.0));
    assert_eq!(epoch.current_time(), 1.0);
    assert!(!epoch.consume_until(3.0));
    for b in epoch.bodies() {
        assert_eq!(b.current().time, 2.0);
    }
}

#[test]
fn test_validate_detects_desynchronised_bodies() {
    let mut epoch = Epoch::new(vec![body("a", 1.0, 0.0), body("b", 1.0, 0.0)]).unwrap();
    advance(&mut epoch, &[1.0]);
    assert!(epoch.validate().is_ok());

    epoch.bodies_mut()[0].push_sample(Sample::new(2.0, Point2::origin(), Vector2::zeros()));
    assert!(matches!(
        epoch.validate(),
        Err(EngineError::InconsistentTimelineState(_))
    ));
}

#[test]
fn test_validate_detects_duplicate_names() {
    let epoch = Epoch::new(vec![body("a", 1.0, 0.0), body("a", 1.0, 0.0)]).unwrap();
    assert!(epoch.validate().is_err());
}

fn merge(a: &str, b: &str, time: f64) -> MergeOrigin {
    MergeOrigin {
        time,
        removed: [a.into(), b.into()],
        merged: format!("{a} + {b}"),
    }
}

#[test]
fn test_merge_origin_successor() {
    let origin = MergeOrigin {
        time: 5.0,
        removed: ["a".into(), "b".into()],
        merged: "a + b".into(),
    };
    assert_eq!(origin.successor_of("b"), Some("a + b"));
    assert_eq!(origin.successor_of("c"), None);
}

#[test]
fn test_inherit_matches_trails_by_name() {
    let mut old = Epoch::new(vec![body("a", 1.0, 0.0), body("b", 1.0, 0.0)]).unwrap();
    advance(&mut old, &[1.0, 2.0]);
    old.consume_until(2.0);

    let mut next = Epoch::new(vec![old.bodies()[0].fork(), body("c", 1.0, 0.0)]).unwrap();
    next.inherit(old);

    let trail: Vec<f64> = next.find("a").unwrap().history().iter().map(|s| s.time).collect();
    assert_eq!(trail, vec![0.0, 1.0, 2.0]);
    assert!(next.find("c").unwrap().history().is_empty());
}

#[test]
fn test_inherit_carries_earlier_merges() {
    let first = Epoch::new(vec![body("a + b", 2.0, 0.0), body("c", 1.0, 0.0)])
        .unwrap()
        .with_origin(merge("a", "b", 1.0));
    let mut second = Epoch::new(vec![body("c + a + b", 3.0, 0.0)])
        .unwrap()
        .with_origin(merge("c", "a + b", 2.0));

    second.inherit(first);

    assert_eq!(second.origins().len(), 2);
    assert_eq!(second.origin().unwrap().merged, "c + a + b");
    assert_eq!(second.successor_of("a"), Some("a + b"));
    assert_eq!(second.successor_of("a + b"), Some("c + a + b"));
    assert_eq!(second.successor_of("d"), None);
}

#[test]
fn test_drop_drafts() {
    let mut epoch = Epoch::new(vec![body("a", 1.0, 0.0), body("u", 1.0, 0.0).into_draft()]).unwrap();
    assert_eq!(epoch.drop_drafts().unwrap(), 1);
    assert_eq!(epoch.len(), 1);
    assert_eq!(epoch.drop_drafts().unwrap(), 0);
}

#[test]
fn test_drop_drafts_never_empties_the_epoch() {
    let mut epoch = Epoch::new(vec![body("u", 1.0, 0.0).into_draft()]).unwrap();
    assert!(matches!(
        epoch.drop_drafts(),
        Err(EngineError::InconsistentTimelineState(_))
    ));
    assert_eq!(epoch.len(), 1);
    assert_eq!(epoch.current_time(), 0.0);
}
