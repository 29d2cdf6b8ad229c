//! Epochs: maximal time intervals with a fixed body set

use crate::body::Body;
use crate::error::{EngineError, Result};
use nalgebra::Vector2;
use serde::Serialize;
use std::collections::HashSet;

/// The merge that opened an epoch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOrigin {
    /// Time of the collision sample (s)
    pub time: f64,
    /// Names of the two bodies that stopped existing
    pub removed: [String; 2],
    /// Name of the body that replaced them
    pub merged: String,
}

impl MergeOrigin {
    /// The merged name if `name` was one of the removed bodies
    pub fn successor_of(&self, name: &str) -> Option<&str> {
        if self.removed.iter().any(|r| r == name) {
            Some(&self.merged)
        } else {
            None
        }
    }
}

/// A fixed set of bodies sharing one timeline
///
/// Every body in an epoch has samples at the same times. The first epoch
/// of a timeline is the present; later epochs are predictions that begin
/// at the collision that ended the previous one.
#[derive(Debug, Clone)]
pub struct Epoch {
    bodies: Vec<Body>,
    /// Merges in time order; the last one opened this epoch. Earlier
    /// entries are carried over from epochs this one replaced.
    origins: Vec<MergeOrigin>,
}

impl Epoch {
    /// Fails with `InconsistentTimelineState` for an empty body list
    pub fn new(bodies: Vec<Body>) -> Result<Self> {
        if bodies.is_empty() {
            return Err(EngineError::InconsistentTimelineState(
                "an epoch needs at least one body".into(),
            ));
        }
        Ok(Self {
            bodies,
            origins: Vec::new(),
        })
    }

    pub(crate) fn with_origin(mut self, origin: MergeOrigin) -> Self {
        self.origins.push(origin);
        self
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut Vec<Body> {
        &mut self.bodies
    }

    /// The merge that opened this epoch
    pub fn origin(&self) -> Option<&MergeOrigin> {
        self.origins.last()
    }

    /// Every merge since population last started from this epoch's bodies
    pub fn origins(&self) -> &[MergeOrigin] {
        &self.origins
    }

    /// Successor of `name` under the latest merge that removed it
    pub fn successor_of(&self, name: &str) -> Option<&str> {
        self.origins.iter().rev().find_map(|o| o.successor_of(name))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Time of the bodies' current samples
    pub fn current_time(&self) -> f64 {
        self.bodies[0].current().time
    }

    /// Time of the bodies' latest samples
    pub fn latest_time(&self) -> f64 {
        self.bodies[0].latest().time
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.momentum())
    }

    /// `base`, or `base (n)` with the smallest `n` not already taken
    pub(crate) fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base} ({n})"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Consumes every body's samples earlier than `target`.
    ///
    /// Returns `false` when at least one body ran out of samples short of
    /// `target`. Every body is consumed either way.
    pub(crate) fn consume_until(&mut self, target: f64) -> bool {
        let mut reached = true;
        for body in &mut self.bodies {
            reached &= body.consume_until(target);
        }
        reached
    }

    pub(crate) fn truncate_future(&mut self) {
        for body in &mut self.bodies {
            body.truncate_future();
        }
    }

    /// Drops every draft body and returns how many went.
    ///
    /// Fails without touching the epoch when only drafts are left.
    pub(crate) fn drop_drafts(&mut self) -> Result<usize> {
        if self.bodies.iter().all(|b| b.is_draft) {
            return Err(EngineError::InconsistentTimelineState(
                "no committed bodies left in the current epoch".into(),
            ));
        }
        let before = self.bodies.len();
        self.bodies.retain(|b| !b.is_draft);
        Ok(before - self.bodies.len())
    }

    /// Takes over from the epoch this one replaces: its merges go in front
    /// of ours and consumed trails carry over. Bodies are matched by name;
    /// trails of bodies that did not survive are dropped.
    pub(crate) fn inherit(&mut self, previous: Epoch) {
        let mut origins = previous.origins;
        origins.append(&mut self.origins);
        self.origins = origins;

        for old in previous.bodies {
            let name = old.name.clone();
            if let Some(body) = self.bodies.iter_mut().find(|b| b.name == name) {
                body.inherit_trail(old.into_trail());
            }
        }
    }

    /// Checks names are unique and every body shares the same sample times
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.name.as_str()) {
                return Err(EngineError::InconsistentTimelineState(format!(
                    "duplicate body name {}",
                    body.name
                )));
            }
        }

        let reference = match self.bodies.first() {
            Some(body) => body,
            None => {
                return Err(EngineError::InconsistentTimelineState(
                    "epoch has no bodies".into(),
                ))
            }
        };
        for body in &self.bodies[1..] {
            let aligned = body.future_len() == reference.future_len()
                && body
                    .future()
                    .zip(reference.future())
                    .all(|(a, b)| a.time == b.time);
            if !aligned {
                return Err(EngineError::InconsistentTimelineState(format!(
                    "{} is out of step with {}",
                    body.name, reference.name
                )));
            }
        }

        for body in &self.bodies {
            let increasing = body
                .future()
                .zip(body.future().skip(1))
                .all(|(a, b)| a.time < b.time);
            if !increasing {
                return Err(EngineError::InconsistentTimelineState(format!(
                    "samples of {} are not strictly increasing",
                    body.name
                )));
            }
        }

        Ok(())
    }
}
