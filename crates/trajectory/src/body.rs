use nalgebra::{Point2, Vector2};
use serde::Serialize;
use std::collections::VecDeque;

/// One point of a body's trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,              // s
    pub position: Point2<f64>,  // m
    pub velocity: Vector2<f64>, // m/s
}

impl Sample {
    pub fn new(time: f64, position: Point2<f64>, velocity: Vector2<f64>) -> Self {
        Self {
            time,
            position,
            velocity,
        }
    }
}

/// A gravitating sphere and the part of its trajectory the engine knows about
///
/// The future sequence is stored as the current sample plus a queue of
/// later samples, so a body always has a well-defined current state. Samples
/// leave the front of the queue when time is consumed and land in the
/// append-only history.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub mass: f64,   // kg
    pub radius: f64, // m, collision geometry
    /// Reserved for external forces (thrust and the like)
    pub applied_acceleration: Vector2<f64>,
    /// True while the body is a live preview that has not been committed
    pub is_draft: bool,
    current: Sample,
    upcoming: VecDeque<Sample>,
    history: Vec<Sample>,
}

impl Body {
    /// Creates a body whose trajectory starts at `time`
    ///
    /// # Examples
    ///
    /// ```
    /// use trajectory::body::Body;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let earth = Body::new(
    ///     "Earth",
    ///     5.9722e24,
    ///     6.371e6,
    ///     Point2::new(0.0, 152.10e9),
    ///     Vector2::new(-29.29e3, 0.0),
    ///     0.0,
    /// );
    ///
    /// assert_eq!(earth.current().time, 0.0);
    /// assert_eq!(earth.future_len(), 1);
    /// assert!(earth.history().is_empty());
    /// ```
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        time: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            applied_acceleration: Vector2::zeros(),
            is_draft: false,
            current: Sample::new(time, position, velocity),
            upcoming: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Marks the body as an uncommitted preview
    pub fn into_draft(mut self) -> Self {
        self.is_draft = true;
        self
    }

    /// The sample at the body's current time
    pub fn current(&self) -> &Sample {
        &self.current
    }

    /// The last predicted sample
    pub fn latest(&self) -> &Sample {
        self.upcoming.back().unwrap_or(&self.current)
    }

    /// Future samples in time order, starting with the current one
    pub fn future(&self) -> impl Iterator<Item = &Sample> + '_ {
        std::iter::once(&self.current).chain(self.upcoming.iter())
    }

    pub fn future_len(&self) -> usize {
        1 + self.upcoming.len()
    }

    /// True when nothing has been predicted past the current sample
    pub fn at_final_sample(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Samples already consumed, oldest first
    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.current.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.current.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.current.position - other.current.position).magnitude()
    }

    /// Appends a predicted sample. Times must be strictly increasing.
    pub(crate) fn push_sample(&mut self, sample: Sample) {
        debug_assert!(
            sample.time > self.latest().time,
            "samples for {} must be strictly increasing",
            self.name
        );
        self.upcoming.push_back(sample);
    }

    /// Throws away every predicted sample past the current one
    pub(crate) fn truncate_future(&mut self) {
        self.upcoming.clear();
    }

    /// Moves samples earlier than `target` into the history.
    ///
    /// Returns `false` when the final sample is reached while still short
    /// of `target`; the final sample itself stays current.
    pub(crate) fn consume_until(&mut self, target: f64) -> bool {
        while self.current.time < target {
            match self.upcoming.pop_front() {
                Some(next) => {
                    let done = std::mem::replace(&mut self.current, next);
                    self.record(done);
                }
                None => return false,
            }
        }
        true
    }

    /// A copy of this body starting from its latest sample, without history
    pub(crate) fn fork(&self) -> Body {
        Body {
            name: self.name.clone(),
            mass: self.mass,
            radius: self.radius,
            applied_acceleration: self.applied_acceleration,
            is_draft: self.is_draft,
            current: *self.latest(),
            upcoming: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Hands the consumed trail, plus the final sample, to a successor
    pub(crate) fn into_trail(self) -> Vec<Sample> {
        let mut trail = self.history;
        if trail.last().map_or(true, |last| last.time < self.current.time) {
            trail.push(self.current);
        }
        trail
    }

    /// Prepends a predecessor's trail to this body's history
    pub(crate) fn inherit_trail(&mut self, mut trail: Vec<Sample>) {
        let first_own = self.history.first().map(|s| s.time);
        if let Some(first) = first_own {
            trail.retain(|s| s.time < first);
        }
        trail.append(&mut self.history);
        self.history = trail;
    }

    fn record(&mut self, sample: Sample) {
        if self.history.last().map_or(true, |last| last.time < sample.time) {
            self.history.push(sample);
        }
    }
}
