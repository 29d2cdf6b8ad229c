use approx::assert_relative_eq;

use crate::error::EngineError;
use crate::scenario::*;

#[test]
fn test_presets_build() {
    for scenario in [solar_system(), inner_planets(), head_on_pair()] {
        let bodies = scenario.build_bodies().unwrap();
        assert_eq!(bodies.len(), scenario.bodies.len());
        for body in &bodies {
            assert_eq!(body.current().time, 0.0);
            assert!(!body.is_draft);
        }
    }
}

#[test]
fn test_solar_system_values() {
    let scenario = solar_system();
    let sun = &scenario.bodies[1];
    assert_relative_eq!(sun.mass, 1.98847e30);
    assert_relative_eq!(sun.radius, 695.51e6);

    let moon = &scenario.bodies[5];
    assert_relative_eq!(moon.mass, 7.3477e22);
    assert_relative_eq!(moon.position[0], 385.0e6);
    assert_relative_eq!(moon.velocity[1], 1.022e3);
}

#[test]
fn test_invalid_body_is_rejected() {
    let mut scenario = head_on_pair();
    scenario.bodies[1].mass = -1.0;
    assert!(matches!(
        scenario.build_bodies(),
        Err(EngineError::InvalidInput(_))
    ));

    let mut scenario = head_on_pair();
    scenario.bodies[0].velocity[0] = f64::NAN;
    assert!(scenario.build_bodies().is_err());
}

#[test]
fn test_scenario_from_json() {
    let json = r#"{
        "bodies": [
            { "name": "Sun", "mass": 2e30, "radius": 7e8, "position": [0, 0], "velocity": [0, 0] },
            { "name": "Rock", "mass": 1e10, "radius": 1e3, "position": [1.5e11, 0], "velocity": [0, 3e4] }
        ]
    }"#;
    let scenario: ScenarioConfig = serde_json::from_str(json).unwrap();
    let bodies = scenario.build_bodies().unwrap();
    assert_eq!(bodies[1].name, "Rock");
    assert_eq!(bodies[1].current().velocity.y, 3.0e4);
}
