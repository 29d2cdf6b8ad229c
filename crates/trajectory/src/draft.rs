//! The user-placed preview body and its lifecycle
//!
//! A draft is rebuilt from the latest pointer drag on every population
//! pass. It survives a pass only once it is finalized, at which point it
//! becomes an ordinary body and the next draft gets a fresh name.

use crate::body::Body;
use crate::error::{EngineError, Result};
use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// Everything needed to place a draft body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftInput {
    pub mass: f64,   // kg
    pub radius: f64, // m
    /// Where the drag started; the body is placed here
    pub anchor: Point2<f64>,
    /// Where the pointer is now
    pub current: Point2<f64>,
    /// Seconds per unit of drag; velocity = drag / scale
    pub velocity_scale: f64,
}

impl DraftInput {
    /// Slingshot velocity: pulling away from the anchor launches the body
    /// the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use trajectory::draft::DraftInput;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let input = DraftInput {
    ///     mass: 1.0e4,
    ///     radius: 100.0,
    ///     anchor: Point2::new(0.0, 0.0),
    ///     current: Point2::new(-2.0e9, 0.0),
    ///     velocity_scale: 1.0e6,
    /// };
    ///
    /// assert_eq!(input.launch_velocity(), Vector2::new(2.0e3, 0.0));
    /// ```
    pub fn launch_velocity(&self) -> Vector2<f64> {
        (self.anchor - self.current) / self.velocity_scale
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.mass, self.radius, self.velocity_scale]
            .iter()
            .chain(self.anchor.coords.iter())
            .chain(self.current.coords.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(EngineError::InvalidInput(
                "draft parameters must be finite".into(),
            ));
        }
        if self.mass <= 0.0 || self.radius <= 0.0 {
            return Err(EngineError::InvalidInput(
                "draft mass and radius must be positive".into(),
            ));
        }
        if self.velocity_scale <= 0.0 {
            return Err(EngineError::InvalidInput(
                "draft velocity scale must be positive".into(),
            ));
        }
        Ok(())
    }

    /// A draft body starting at `time`
    pub fn build(&self, name: impl Into<String>, time: f64) -> Body {
        Body::new(
            name,
            self.mass,
            self.radius,
            self.anchor,
            self.launch_velocity(),
            time,
        )
        .into_draft()
    }
}

/// Where the draft is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum DraftPhase {
    /// No draft exists
    Uncommitted,
    /// A draft body named `name` is part of the current epoch
    Previewing { name: String },
    /// The draft `name` was just committed; reverts to `Uncommitted` at the
    /// start of the next pass
    Finalized { name: String },
}

/// Tracks the draft phase and hands out draft names
#[derive(Debug, Clone)]
pub struct DraftLifecycle {
    phase: DraftPhase,
    serial: u32,
}

impl Default for DraftLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftLifecycle {
    pub fn new() -> Self {
        Self {
            phase: DraftPhase::Uncommitted,
            serial: 1,
        }
    }

    pub fn phase(&self) -> &DraftPhase {
        &self.phase
    }

    /// Name the next draft will be offered under
    pub fn next_name(&self) -> String {
        format!("User {}", self.serial)
    }

    pub(crate) fn begin_pass(&mut self) {
        if let DraftPhase::Finalized { .. } = self.phase {
            self.phase = DraftPhase::Uncommitted;
        }
    }

    /// Commits the previewed draft and returns its name.
    ///
    /// A preview whose body `is_present` no longer finds, because it was
    /// merged away, is left as it is for [`discard`](Self::discard).
    pub(crate) fn finalize(&mut self, is_present: impl Fn(&str) -> bool) -> Option<String> {
        match std::mem::replace(&mut self.phase, DraftPhase::Uncommitted) {
            DraftPhase::Previewing { name } if is_present(&name) => {
                self.serial += 1;
                self.phase = DraftPhase::Finalized { name: name.clone() };
                Some(name)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Forgets an uncommitted preview
    pub(crate) fn discard(&mut self) {
        if let DraftPhase::Previewing { .. } = self.phase {
            self.phase = DraftPhase::Uncommitted;
        }
    }

    pub(crate) fn preview(&mut self, name: String) {
        self.phase = DraftPhase::Previewing { name };
    }
}
