//! Initial body sets
//!
//! A scenario is plain data so it can be supplied as JSON across the wasm
//! boundary. The presets use SI units throughout.

use crate::body::Body;
use crate::error::{EngineError, Result};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use units::{Length, Mass};

/// One body at time zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,          // kg
    pub radius: f64,        // m
    pub position: [f64; 2], // m
    pub velocity: [f64; 2], // m/s
}

impl BodyConfig {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: [f64; 2],
        velocity: [f64; 2],
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            position,
            velocity,
        }
    }

    pub fn build(&self) -> Body {
        Body::new(
            self.name.clone(),
            self.mass,
            self.radius,
            Point2::new(self.position[0], self.position[1]),
            Vector2::new(self.velocity[0], self.velocity[1]),
            0.0,
        )
    }

    fn validate(&self) -> Result<()> {
        let finite = [self.mass, self.radius]
            .iter()
            .chain(&self.position)
            .chain(&self.velocity)
            .all(|v| v.is_finite());
        if !finite || self.mass <= 0.0 || self.radius <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "body {} has invalid parameters",
                self.name
            )));
        }
        Ok(())
    }
}

/// The bodies a timeline starts from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Builds the bodies after checking every value is usable
    pub fn build_bodies(&self) -> Result<Vec<Body>> {
        self.bodies
            .iter()
            .map(|config| {
                config.validate()?;
                Ok(config.build())
            })
            .collect()
    }
}

// m
const PROBE_OFFSET: f64 = 100.0e9;

/// Sun, Earth and Venus on their canonical orbits
pub fn inner_planets() -> ScenarioConfig {
    ScenarioConfig {
        bodies: vec![sun(), earth(), venus()],
    }
}

/// A small probe, the Sun, Earth, Venus, a ship near Venus and the Moon
///
/// # Examples
///
/// ```
/// use trajectory::scenario::solar_system;
///
/// let scenario = solar_system();
/// let names: Vec<_> = scenario.bodies.iter().map(|b| b.name.as_str()).collect();
/// assert_eq!(names, ["User", "Sun", "Earth", "Venus", "Ship", "Moon"]);
/// ```
pub fn solar_system() -> ScenarioConfig {
    let venus = venus();
    let earth = earth();

    let user = BodyConfig::new(
        "User",
        100.0e2,
        100.0,
        [-PROBE_OFFSET, -PROBE_OFFSET],
        [1.0, 3.5e2],
    );
    let ship = BodyConfig::new(
        "Ship",
        4.867e4,
        100.0,
        [venus.position[0], venus.position[1] + PROBE_OFFSET],
        [0.0, -200.02e1],
    );
    let moon = BodyConfig::new(
        "Moon",
        Mass::from_lunar_masses(1.0).to_kg(),
        Length::from_km(1_737.1).to_m(),
        [earth.position[0] + 385.0e6, earth.position[1]],
        [earth.velocity[0], earth.velocity[1] + 1.022e3],
    );

    ScenarioConfig {
        bodies: vec![user, sun(), earth, venus, ship, moon],
    }
}

/// Two equal bodies falling into each other along the x axis
pub fn head_on_pair() -> ScenarioConfig {
    ScenarioConfig {
        bodies: vec![
            BodyConfig::new("A", 1.0e24, 1.0e6, [-2.0e6, 0.0], [10.0, 0.0]),
            BodyConfig::new("B", 1.0e24, 1.0e6, [2.0e6, 0.0], [-10.0, 0.0]),
        ],
    }
}

fn sun() -> BodyConfig {
    BodyConfig::new(
        "Sun",
        Mass::from_solar_masses(1.0).to_kg(),
        Length::from_solar_radii(1.0).to_m(),
        [0.0, 0.0],
        [0.0, 0.0],
    )
}

fn earth() -> BodyConfig {
    BodyConfig::new(
        "Earth",
        Mass::from_earth_masses(1.0).to_kg(),
        Length::from_earth_radii(1.0).to_m(),
        [0.0, 152.10e9],
        [-29.29e3, 0.0],
    )
}

fn venus() -> BodyConfig {
    BodyConfig::new(
        "Venus",
        4.867e24,
        6.0518e6,
        [-108.8e9, 0.0],
        [0.0, -35.02e3],
    )
}
