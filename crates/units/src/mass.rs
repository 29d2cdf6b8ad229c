use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul};

/// Mass of the Sun in kilograms (1.98847 × 10³⁰ kg)
pub const SOLAR_MASS_KG: f64 = 1.98847e30;

/// Mass of the Earth in kilograms (5.9722 × 10²⁴ kg)
pub const EARTH_MASS_KG: f64 = 5.9722e24;

/// Mass of the Moon in kilograms (7.3477 × 10²² kg)
const LUNAR_MASS_KG: f64 = 7.3477e22;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct stores kilograms, the SI base unit used throughout the
/// trajectory engine. Astronomical constructors exist for building scenarios
/// from familiar reference masses.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let sun = Mass::from_solar_masses(1.0);
/// let earth = Mass::from_earth_masses(1.0);
/// let probe = Mass::from_kg(1.0e4);
///
/// let earths_per_sun = sun / earth;
/// assert!(earths_per_sun > 330_000.0);
/// assert_eq!(probe.to_kg(), 1.0e4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: kilograms

impl Mass {
    /// Creates a new `Mass` from a value in kilograms.
    pub fn from_kg(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in solar masses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::{Mass, SOLAR_MASS_KG};
    ///
    /// let sun = Mass::from_solar_masses(1.0);
    /// assert_eq!(sun.to_kg(), SOLAR_MASS_KG);
    /// ```
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_KG)
    }

    /// Creates a new `Mass` from a value in Earth masses.
    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_KG)
    }

    /// Creates a new `Mass` from a value in lunar masses.
    pub fn from_lunar_masses(value: f64) -> Self {
        Self(value * LUNAR_MASS_KG)
    }

    /// Returns the mass in kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0
    }

    /// Converts the mass to solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0 / SOLAR_MASS_KG
    }

    /// Converts the mass to Earth masses.
    pub fn to_earth_masses(&self) -> f64 {
        self.0 / EARTH_MASS_KG
    }

    /// Converts the mass to lunar masses.
    pub fn to_lunar_masses(&self) -> f64 {
        self.0 / LUNAR_MASS_KG
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}
