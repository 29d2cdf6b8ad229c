//! Per-refresh input supplied by collaborators
//!
//! The engine never reads input widgets itself; an [`InputRecord`] and a
//! [`PointerDrag`] are handed to every refresh.

use crate::draft::DraftInput;
use crate::error::{EngineError, Result};
use crate::integrator::DEFAULT_TOLERANCE;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use units::Time;

/// Numeric settings for a refresh, all in SI units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    /// Mass of the next draft body (kg)
    pub mass: f64,
    /// Radius of the next draft body (m)
    pub radius: f64,
    /// Step resolution: largest gap between stored samples (s)
    pub time_step: f64,
    /// Lookahead horizon (s)
    pub lookahead: f64,
    /// Relative error tolerance per integrator step
    pub tolerance: f64,
    /// Seconds per metre of drag
    pub draft_velocity_scale: f64,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            mass: 1.0e4,
            radius: 100.0,
            time_step: Time::from_days(1.0).to_seconds(),
            lookahead: Time::from_days(365.0).to_seconds(),
            tolerance: DEFAULT_TOLERANCE,
            draft_velocity_scale: 1.0e6,
        }
    }
}

impl InputRecord {
    /// Builds a record from a time step and lookahead given in days.
    ///
    /// Both are rounded to whole seconds; the integrator grid is laid out
    /// in multiples of the time step and fractional seconds only add noise.
    ///
    /// # Examples
    ///
    /// ```
    /// use trajectory::input::InputRecord;
    ///
    /// let input = InputRecord::from_days(1.0e4, 100.0, 0.5, 30.0, 1e-8, 1.0e6);
    /// assert_eq!(input.time_step, 43_200.0);
    /// assert_eq!(input.lookahead, 2_592_000.0);
    /// ```
    pub fn from_days(
        mass: f64,
        radius: f64,
        time_step_days: f64,
        lookahead_days: f64,
        tolerance: f64,
        draft_velocity_scale: f64,
    ) -> Self {
        Self {
            mass,
            radius,
            time_step: Time::from_days(time_step_days).to_seconds().round(),
            lookahead: Time::from_days(lookahead_days).to_seconds().round(),
            tolerance,
            draft_velocity_scale,
        }
    }

    /// Rejects the record before any timeline state is touched
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mass", self.mass),
            ("radius", self.radius),
            ("timeStep", self.time_step),
            ("lookahead", self.lookahead),
            ("tolerance", self.tolerance),
            ("draftVelocityScale", self.draft_velocity_scale),
        ];

        for (key, value) in fields {
            let valid = match key {
                "lookahead" => value.is_finite() && value >= 0.0,
                _ => value.is_finite() && value > 0.0,
            };
            if !valid {
                return Err(EngineError::InvalidInput(format!("{key} is invalid")));
            }
        }

        Ok(())
    }

    pub fn population_settings(&self) -> PopulationSettings {
        PopulationSettings {
            step_resolution: self.time_step,
            lookahead: self.lookahead,
            tolerance: self.tolerance,
        }
    }

    /// Draft placement for the current drag, if a drag is in progress
    pub fn draft_input(&self, pointer: &PointerDrag) -> Option<DraftInput> {
        pointer.is_dragging.then(|| DraftInput {
            mass: self.mass,
            radius: self.radius,
            anchor: pointer.anchor_point,
            current: pointer.current_point,
            velocity_scale: self.draft_velocity_scale,
        })
    }
}

/// Pointer state in simulation coordinates (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerDrag {
    pub is_dragging: bool,
    pub anchor_point: Point2<f64>,
    pub current_point: Point2<f64>,
}

impl Default for PointerDrag {
    fn default() -> Self {
        Self {
            is_dragging: false,
            anchor_point: Point2::origin(),
            current_point: Point2::origin(),
        }
    }
}

/// How far and how finely a population pass samples the future
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationSettings {
    /// Largest gap between stored samples (s)
    pub step_resolution: f64,
    /// Horizon measured from the current time (s)
    pub lookahead: f64,
    pub tolerance: f64,
}

impl PopulationSettings {
    pub fn new(step_resolution: f64, lookahead: f64) -> Self {
        Self {
            step_resolution,
            lookahead,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step_resolution.is_finite() && self.step_resolution > 0.0) {
            return Err(EngineError::InvalidInput("step resolution is invalid".into()));
        }
        if !(self.lookahead.is_finite() && self.lookahead >= 0.0) {
            return Err(EngineError::InvalidInput("lookahead is invalid".into()));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EngineError::InvalidInput("tolerance is invalid".into()));
        }
        Ok(())
    }
}
