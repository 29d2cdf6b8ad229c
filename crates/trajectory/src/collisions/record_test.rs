use crate::collisions::record::*;

#[test]
fn test_live_name_resolves_to_itself() {
    let record = CollisionRecord::new();
    let found = record.resolve("Earth", |n| n == "Earth", |_| None, 4);
    assert_eq!(found.as_deref(), Some("Earth"));
}

#[test]
fn test_unknown_dead_name_resolves_to_none() {
    let mut record = CollisionRecord::new();
    record.insert("Moon", "Earth + Moon");
    let found = record.resolve("Ship", |n| n == "Earth + Moon", |_| None, 4);
    assert_eq!(found, None);
}

#[test]
fn test_chain_is_followed() {
    let mut record = CollisionRecord::new();
    record.insert("Earth", "Earth + Moon");
    record.insert("Moon", "Earth + Moon");
    record.insert("Earth + Moon", "Venus + Earth + Moon");

    let live = |n: &str| n == "Venus + Earth + Moon";
    let found = record.resolve("Earth", live, |_| None, 4);
    assert_eq!(found.as_deref(), Some("Venus + Earth + Moon"));
}

#[test]
fn test_extra_lookup_takes_precedence() {
    let record = CollisionRecord::new();
    let found = record.resolve(
        "Moon",
        |n| n == "Earth + Moon",
        |n| if n == "Moon" { Some("Earth + Moon") } else { None },
        4,
    );
    assert_eq!(found.as_deref(), Some("Earth + Moon"));
}

#[test]
fn test_cycle_stops_at_cap() {
    let mut record = CollisionRecord::new();
    record.insert("a", "b");
    record.insert("b", "a");
    assert_eq!(record.resolve("a", |_| false, |_| None, 10), None);
}

#[test]
fn test_clear_empties_record() {
    let mut record = CollisionRecord::new();
    record.insert("a", "a + b");
    assert_eq!(record.len(), 1);
    record.clear();
    assert!(record.is_empty());
    assert_eq!(record.get("a"), None);
}
