//! The piecewise timeline: epochs, population and time consumption
//!
//! A [`Timeline`] owns the current epoch and a queue of speculative epochs,
//! each opened by a predicted collision. Population recomputes the whole
//! future from the current epoch's present state; ticking consumes samples
//! and promotes the next epoch once the current one runs out.

use crate::body::{Body, Sample};
use crate::bounds::BoundingBox;
use crate::collisions::{find_first_overlap, split_epoch, CollisionRecord};
use crate::draft::{DraftInput, DraftLifecycle, DraftPhase};
use crate::epoch::Epoch;
use crate::error::{EngineError, Result};
use crate::forces::{pack_state, unpack_body, PairwiseGravity};
use crate::input::{InputRecord, PointerDrag, PopulationSettings};
use crate::integrator::{AdaptiveIntegrator, IntegratorOptions};
use crate::scenario::ScenarioConfig;
use log::{debug, warn};
use std::collections::{HashSet, VecDeque};

/// Counters from one population pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationReport {
    /// Merges predicted before the horizon
    pub collisions: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

/// What a call to [`Timeline::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Samples were consumed within the current epoch
    Advanced,
    /// The given number of epochs were promoted to current
    EpochsPromoted(usize),
    /// The last populated sample was reached, or the next epoch would
    /// merge an uncommitted draft; repopulate before ticking on
    HorizonReached,
}

/// Trajectory timeline of a gravitating system
///
/// # Examples
///
/// ```
/// use trajectory::input::PopulationSettings;
/// use trajectory::scenario::head_on_pair;
/// use trajectory::timeline::Timeline;
///
/// let mut timeline = Timeline::from_scenario(&head_on_pair()).unwrap();
/// let settings = PopulationSettings::new(10.0, 2_000.0);
///
/// let report = timeline.populate_trajectories(&settings, None, false).unwrap();
///
/// assert_eq!(report.collisions, 1);
/// assert_eq!(timeline.epoch_count(), 2);
/// assert_eq!(timeline.collisions().get("A"), Some("A + B"));
/// ```
#[derive(Debug, Clone)]
pub struct Timeline {
    current: Epoch,
    pending: VecDeque<Epoch>,
    collisions: CollisionRecord,
    draft: DraftLifecycle,
}

impl Timeline {
    /// Starts a timeline from committed bodies sharing one start time
    ///
    /// # Errors
    ///
    /// `InconsistentTimelineState` for an empty body list, `InvalidInput`
    /// for drafts, duplicate names, unusable values or mismatched start
    /// times.
    pub fn new(bodies: Vec<Body>) -> Result<Self> {
        let mut names = HashSet::new();
        for body in &bodies {
            if body.is_draft {
                return Err(EngineError::InvalidInput(format!(
                    "{} is a draft; drafts are created by population",
                    body.name
                )));
            }
            if !names.insert(body.name.as_str()) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate body name {}",
                    body.name
                )));
            }
            let s = body.current();
            let finite = [body.mass, body.radius, s.time]
                .iter()
                .chain(s.position.coords.iter())
                .chain(s.velocity.iter())
                .all(|v| v.is_finite());
            if !finite || body.mass <= 0.0 || body.radius <= 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "body {} has invalid parameters",
                    body.name
                )));
            }
        }
        if let Some(first) = bodies.first() {
            let start = first.current().time;
            if bodies.iter().any(|b| b.current().time != start) {
                return Err(EngineError::InvalidInput(
                    "bodies must start at the same time".into(),
                ));
            }
        }

        Ok(Self {
            current: Epoch::new(bodies)?,
            pending: VecDeque::new(),
            collisions: CollisionRecord::new(),
            draft: DraftLifecycle::new(),
        })
    }

    pub fn from_scenario(scenario: &ScenarioConfig) -> Result<Self> {
        Self::new(scenario.build_bodies()?)
    }

    /// Epoch whose current time is the present
    pub fn current_epoch(&self) -> &Epoch {
        &self.current
    }

    /// Every epoch in time order, starting with the current one
    pub fn epochs(&self) -> impl Iterator<Item = &Epoch> + '_ {
        std::iter::once(&self.current).chain(self.pending.iter())
    }

    pub fn epoch(&self, index: usize) -> Option<&Epoch> {
        match index {
            0 => Some(&self.current),
            i => self.pending.get(i - 1),
        }
    }

    pub fn epoch_count(&self) -> usize {
        1 + self.pending.len()
    }

    /// The epoch that reaches the horizon
    pub fn final_epoch(&self) -> &Epoch {
        self.pending.back().unwrap_or(&self.current)
    }

    fn final_epoch_mut(&mut self) -> &mut Epoch {
        match self.pending.back_mut() {
            Some(epoch) => epoch,
            None => &mut self.current,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current.current_time()
    }

    /// Time of the last populated sample
    pub fn horizon(&self) -> f64 {
        self.final_epoch().latest_time()
    }

    /// Merges predicted by the last population pass
    pub fn collisions(&self) -> &CollisionRecord {
        &self.collisions
    }

    pub fn draft_phase(&self) -> &DraftPhase {
        self.draft.phase()
    }

    /// Consumed samples of a body in the current epoch
    pub fn history(&self, name: &str) -> Option<&[Sample]> {
        self.current.find(name).map(Body::history)
    }

    /// Recomputes every trajectory from the current epoch's present state
    ///
    /// Speculative epochs and the collision record are thrown away, the
    /// draft transitions are applied, and the integrator is driven up to
    /// `current_time + lookahead`, opening a new epoch at every collision.
    ///
    /// # Errors
    ///
    /// `InvalidInput` leaves the timeline untouched. `NumericalFailure`
    /// abandons the pass and leaves only the current epoch, each body with
    /// its single current sample.
    pub fn populate_trajectories(
        &mut self,
        settings: &PopulationSettings,
        draft: Option<&DraftInput>,
        finalize_draft: bool,
    ) -> Result<PopulationReport> {
        settings.validate()?;
        if let Some(input) = draft {
            input.validate()?;
        }

        self.collapse();
        self.apply_draft(draft, finalize_draft)?;

        match self.integrate(settings) {
            Ok(report) => {
                debug!(
                    "populated {} epoch(s) to t={:.1} s: {} collision(s), {} steps ({} rejected)",
                    self.epoch_count(),
                    self.horizon(),
                    report.collisions,
                    report.accepted_steps,
                    report.rejected_steps
                );
                Ok(report)
            }
            Err(err) => {
                warn!("trajectory population abandoned: {err}");
                self.collapse();
                Err(err)
            }
        }
    }

    /// Validates a collaborator's input and repopulates from it
    pub fn refresh(
        &mut self,
        input: &InputRecord,
        pointer: &PointerDrag,
        finalize_draft: bool,
    ) -> Result<PopulationReport> {
        input.validate()?;
        let draft = input.draft_input(pointer);
        self.populate_trajectories(&input.population_settings(), draft.as_ref(), finalize_draft)
    }

    /// Advances the present by `dt` seconds
    ///
    /// Samples earlier than `current_time + dt` move to history. When the
    /// current epoch runs out it is replaced by the next one and consumption
    /// continues there. The final epoch always keeps its last sample.
    ///
    /// An epoch opened by a merge with the uncommitted draft is never
    /// promoted: time holds at the collision until the draft is finalized
    /// or dropped by the next population pass.
    pub fn tick(&mut self, dt: f64) -> Result<TickOutcome> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EngineError::InvalidInput("dt is invalid".into()));
        }
        if dt > 0.0
            && self.pending.is_empty()
            && self.current.bodies().iter().any(Body::at_final_sample)
        {
            return Err(EngineError::InconsistentTimelineState(
                "tick past the last populated sample; repopulate first".into(),
            ));
        }

        let target = self.current_time() + dt;
        let mut promoted = 0;
        while !self.current.consume_until(target) {
            let Some(next) = self.pending.front() else {
                debug!("horizon reached at t={:.1} s", self.current_time());
                return Ok(TickOutcome::HorizonReached);
            };
            if self.merges_draft(next) {
                debug!(
                    "holding at t={:.1} s until the draft is committed",
                    self.current_time()
                );
                return Ok(TickOutcome::HorizonReached);
            }
            if let Some(next) = self.pending.pop_front() {
                let finished = std::mem::replace(&mut self.current, next);
                self.current.inherit(finished);
                promoted += 1;
                debug!("epoch promoted at t={:.1} s", self.current_time());
            }
        }

        Ok(match promoted {
            0 => TickOutcome::Advanced,
            n => TickOutcome::EpochsPromoted(n),
        })
    }

    /// Whether `next` was opened by a merge that removed a draft of the
    /// current epoch
    fn merges_draft(&self, next: &Epoch) -> bool {
        next.origin().is_some_and(|origin| {
            origin
                .removed
                .iter()
                .any(|name| self.current.find(name).is_some_and(|b| b.is_draft))
        })
    }

    /// Finds the body a follower of `name` should track now
    ///
    /// Follows the merges that led into the current epoch, then the
    /// collision record. `None` means the body was removed with no live
    /// successor.
    pub fn resolve_follow(&self, name: &str) -> Option<&Body> {
        self.resolve_in(&self.current, name)
    }

    /// Like [`resolve_follow`](Self::resolve_follow), but in the epoch that
    /// reaches the horizon
    pub fn resolve_predicted(&self, name: &str) -> Option<&Body> {
        self.resolve_in(self.final_epoch(), name)
    }

    fn resolve_in<'a>(&'a self, epoch: &'a Epoch, name: &str) -> Option<&'a Body> {
        let present = &self.current;
        let cap = self.epochs().map(Epoch::len).sum::<usize>() + present.origins().len() + 1;
        let resolved = self.collisions.resolve(
            name,
            |n| epoch.contains(n),
            |n| present.successor_of(n),
            cap,
        )?;
        epoch.find(&resolved)
    }

    /// Bounding box over every future sample of every epoch
    pub fn extent(&self) -> Option<BoundingBox> {
        BoundingBox::new_from_points(
            self.epochs()
                .flat_map(|epoch| epoch.bodies())
                .flat_map(|body| body.future().map(|s| s.position)),
        )
    }

    /// Square view around a followed body, `scale` radii from its centre
    pub fn follow_extent(&self, name: &str, scale: f64) -> Option<BoundingBox> {
        let body = self.resolve_follow(name)?;
        Some(BoundingBox::around(
            body.current().position,
            scale * body.radius,
        ))
    }

    /// Checks the invariants that tie epochs together
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<&Epoch> = None;
        for epoch in self.epochs() {
            epoch.validate()?;
            if let Some(previous) = previous {
                if epoch.current_time() != previous.latest_time() {
                    return Err(EngineError::InconsistentTimelineState(format!(
                        "epoch starting at t={} does not continue from t={}",
                        epoch.current_time(),
                        previous.latest_time()
                    )));
                }
            }
            previous = Some(epoch);
        }

        let drafts = self.current.bodies().iter().filter(|b| b.is_draft).count();
        if drafts > 1 {
            return Err(EngineError::InconsistentTimelineState(format!(
                "{drafts} drafts in the current epoch"
            )));
        }
        Ok(())
    }

    /// Drops speculative epochs, predicted samples and recorded merges
    fn collapse(&mut self) {
        self.pending.clear();
        self.current.truncate_future();
        self.collisions.clear();
    }

    fn apply_draft(&mut self, draft: Option<&DraftInput>, finalize: bool) -> Result<()> {
        self.draft.begin_pass();

        // Finalize before the new draft is built
        if finalize {
            let current = &self.current;
            if let Some(name) = self.draft.finalize(|n| current.contains(n)) {
                if let Some(body) = self
                    .current
                    .bodies_mut()
                    .iter_mut()
                    .find(|b| b.name == name)
                {
                    body.is_draft = false;
                }
                debug!("draft {name} finalized");
            }
        }

        if self.current.drop_drafts()? > 0 {
            debug!("uncommitted draft dropped");
        }
        self.draft.discard();

        if let Some(input) = draft {
            let name = self.current.unique_name(&self.draft.next_name());
            let body = input.build(name.clone(), self.current_time());
            self.current.bodies_mut().push(body);
            self.draft.preview(name);
        }

        Ok(())
    }

    fn integrate(&mut self, settings: &PopulationSettings) -> Result<PopulationReport> {
        let horizon = self.current_time() + settings.lookahead;
        let options =
            IntegratorOptions::new(settings.step_resolution).with_tolerance(settings.tolerance);
        let mut report = PopulationReport::default();

        loop {
            let epoch = self.final_epoch();
            let start = epoch.latest_time();
            let span = horizon - start;
            if span <= 0.0 {
                break;
            }

            // Offset time keeps the integrator clock small
            let mut integrator = AdaptiveIntegrator::new(
                pack_state(epoch.bodies()),
                PairwiseGravity::from_bodies(epoch.bodies()),
                0.0,
                options,
            );

            let collided = self.run_segment(&mut integrator, start, span, settings.step_resolution)?;
            let stats = integrator.stats();
            report.accepted_steps += stats.accepted;
            report.rejected_steps += stats.rejected;

            if !collided {
                break;
            }
            report.collisions += 1;
        }

        Ok(report)
    }

    /// Drives one integrator over the final epoch in sub-steps ending on
    /// multiples of `resolution`. Returns `true` when a collision opened a
    /// new epoch.
    fn run_segment(
        &mut self,
        integrator: &mut AdaptiveIntegrator<PairwiseGravity>,
        start: f64,
        span: f64,
        resolution: f64,
    ) -> Result<bool> {
        let mut grid: u64 = 0;
        loop {
            grid += 1;
            let target = (resolution * grid as f64).min(span);

            loop {
                let before = integrator.time();
                let more = integrator.advance(target)?;
                if integrator.time() > before
                    && self.record_step(start + integrator.time(), integrator.state())
                    && self.split_on_collision()?
                {
                    return Ok(true);
                }
                if !more {
                    break;
                }
            }

            if target >= span {
                return Ok(false);
            }
        }
    }

    /// Appends one sample per body to the final epoch
    fn record_step(&mut self, time: f64, state: &[f64]) -> bool {
        let epoch = self.final_epoch_mut();
        if time <= epoch.latest_time() {
            return false;
        }
        for (i, body) in epoch.bodies_mut().iter_mut().enumerate() {
            let (position, velocity) = unpack_body(state, i);
            body.push_sample(Sample::new(time, position, velocity));
        }
        true
    }

    fn split_on_collision(&mut self) -> Result<bool> {
        let epoch = self.final_epoch();
        let Some(event) = find_first_overlap(epoch.bodies()) else {
            return Ok(false);
        };

        let (bodies, origin) = split_epoch(epoch, &event);
        for removed in &origin.removed {
            self.collisions.insert(removed.clone(), origin.merged.clone());
        }
        self.pending.push_back(Epoch::new(bodies)?.with_origin(origin));
        Ok(true)
    }
}
