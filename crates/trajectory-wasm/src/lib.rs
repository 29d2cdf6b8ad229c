//! WASM bindings for the trajectory engine.
//!
//! # Architecture
//!
//! Timelines are stored in thread-local storage (WASM is single-threaded).
//! Functions return opaque IDs for referencing mutable state, and
//! serializable snapshots for reading state. All quantities are SI.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create_solar_system();
//!
//! // Every frame: repopulate from the form and pointer, then advance
//! simulation_refresh(simId, {
//!   mass: 1e4, radius: 100, timeStep: 86400, lookahead: 31536000,
//!   tolerance: 1e-8, draftVelocityScale: 1e6
//! }, { isDragging: false, anchorPoint: [0, 0], currentPoint: [0, 0] }, false);
//! simulation_tick(simId, 86400);
//!
//! // Predicted paths and trails for rendering
//! const epochs = simulation_get_epochs(simId);
//! const trails = simulation_get_history(simId);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use trajectory::body::{Body, Sample};
use trajectory::bounds::BoundingBox;
use trajectory::draft::DraftPhase;
use trajectory::epoch::{Epoch, MergeOrigin};
use trajectory::input::{InputRecord, PointerDrag};
use trajectory::scenario::{solar_system, ScenarioConfig};
use trajectory::timeline::{PopulationReport, TickOutcome, Timeline};
use trajectory::EngineError;

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn engine_error(err: EngineError) -> JsError {
    JsError::new(&err.to_string())
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Timeline>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn store(timeline: Timeline) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, timeline);
    });

    id
}

fn with_simulation<T>(
    sim_id: u32,
    f: impl FnOnce(&mut Timeline) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let timeline = sims
            .get_mut(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        f(timeline)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// One trajectory sample
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SampleSnapshot {
    /// Time in seconds
    pub t: f64,
    /// Position [x, y] in metres
    pub position: [f64; 2],
    /// Velocity [x, y] in m/s
    pub velocity: [f64; 2],
}

impl From<&Sample> for SampleSnapshot {
    fn from(sample: &Sample) -> Self {
        Self {
            t: sample.time,
            position: [sample.position.x, sample.position.y],
            velocity: [sample.velocity.x, sample.velocity.y],
        }
    }
}

/// A body and its predicted samples within one epoch
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectorySnapshot {
    pub name: String,
    /// Mass in kg
    pub mass: f64,
    /// Radius in metres
    pub radius: f64,
    pub is_draft: bool,
    pub samples: Vec<SampleSnapshot>,
}

impl From<&Body> for TrajectorySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            name: body.name.clone(),
            mass: body.mass,
            radius: body.radius,
            is_draft: body.is_draft,
            samples: body.future().map(SampleSnapshot::from).collect(),
        }
    }
}

/// The merge that opened an epoch
#[derive(Clone, Debug, Serialize)]
pub struct MergeSnapshot {
    pub time: f64,
    pub removed: [String; 2],
    pub merged: String,
}

impl From<&MergeOrigin> for MergeSnapshot {
    fn from(origin: &MergeOrigin) -> Self {
        Self {
            time: origin.time,
            removed: origin.removed.clone(),
            merged: origin.merged.clone(),
        }
    }
}

/// One epoch of the timeline
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochSnapshot {
    pub start_time: f64,
    pub end_time: f64,
    pub origin: Option<MergeSnapshot>,
    pub bodies: Vec<TrajectorySnapshot>,
}

impl From<&Epoch> for EpochSnapshot {
    fn from(epoch: &Epoch) -> Self {
        Self {
            start_time: epoch.current_time(),
            end_time: epoch.latest_time(),
            origin: epoch.origin().map(MergeSnapshot::from),
            bodies: epoch.bodies().iter().map(TrajectorySnapshot::from).collect(),
        }
    }
}

/// Consumed samples of a body, oldest first
#[derive(Clone, Debug, Serialize)]
pub struct TrailSnapshot {
    pub name: String,
    pub samples: Vec<SampleSnapshot>,
}

/// Result of a refresh
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSnapshot {
    pub collisions: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub epochs: usize,
    pub horizon: f64,
    pub draft: DraftPhase,
}

impl RefreshSnapshot {
    fn new(report: PopulationReport, timeline: &Timeline) -> Self {
        Self {
            collisions: report.collisions,
            accepted_steps: report.accepted_steps,
            rejected_steps: report.rejected_steps,
            epochs: timeline.epoch_count(),
            horizon: timeline.horizon(),
            draft: timeline.draft_phase().clone(),
        }
    }
}

/// Result of a tick
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSnapshot {
    /// Current time in seconds
    pub time: f64,
    /// Epochs that became current during the tick
    pub promoted: usize,
    /// The caller must refresh before ticking again
    pub horizon_reached: bool,
}

/// A removed body and the body that replaced it
#[derive(Clone, Debug, Serialize)]
pub struct CollisionSnapshot {
    pub removed: String,
    pub merged: String,
}

/// Axis-aligned view rectangle in metres
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ExtentSnapshot {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl From<BoundingBox> for ExtentSnapshot {
    fn from(bounds: BoundingBox) -> Self {
        Self {
            min: [bounds.min.x, bounds.min.y],
            max: [bounds.max.x, bounds.max.y],
        }
    }
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create a simulation from a scenario.
///
/// # Arguments
/// * `scenario` - `{ bodies: [{ name, mass, radius, position, velocity }] }`
///
/// # Returns
/// A simulation ID for use with other functions
#[wasm_bindgen]
pub fn simulation_create(scenario: JsValue) -> Result<u32, JsError> {
    let scenario: ScenarioConfig = from_js(scenario)?;
    let timeline = Timeline::from_scenario(&scenario).map_err(engine_error)?;
    Ok(store(timeline))
}

/// Create a simulation of the built-in solar system preset.
#[wasm_bindgen]
pub fn simulation_create_solar_system() -> Result<u32, JsError> {
    let timeline = Timeline::from_scenario(&solar_system()).map_err(engine_error)?;
    Ok(store(timeline))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

// =============================================================================
// Population and time
// =============================================================================

/// Recompute every trajectory from the present.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `input` - `{ mass, radius, timeStep, lookahead, tolerance, draftVelocityScale }`
/// * `pointer` - `{ isDragging, anchorPoint, currentPoint }`
/// * `finalize` - Commit the current draft (pointer released)
#[wasm_bindgen]
pub fn simulation_refresh(
    sim_id: u32,
    input: JsValue,
    pointer: JsValue,
    finalize: bool,
) -> Result<JsValue, JsError> {
    let input: InputRecord = from_js(input)?;
    let pointer: PointerDrag = from_js(pointer)?;

    with_simulation(sim_id, |timeline| {
        let report = timeline
            .refresh(&input, &pointer, finalize)
            .map_err(engine_error)?;
        to_js(&RefreshSnapshot::new(report, timeline))
    })
}

/// Advance the present by `dt` seconds.
#[wasm_bindgen]
pub fn simulation_tick(sim_id: u32, dt: f64) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |timeline| {
        let outcome = timeline.tick(dt).map_err(engine_error)?;
        let (promoted, horizon_reached) = match outcome {
            TickOutcome::Advanced => (0, false),
            TickOutcome::EpochsPromoted(n) => (n, false),
            TickOutcome::HorizonReached => (0, true),
        };
        to_js(&TickSnapshot {
            time: timeline.current_time(),
            promoted,
            horizon_reached,
        })
    })
}

/// Current simulation time in seconds.
#[wasm_bindgen]
pub fn simulation_get_time(sim_id: u32) -> Result<f64, JsError> {
    with_simulation(sim_id, |timeline| Ok(timeline.current_time()))
}

// =============================================================================
// Queries
// =============================================================================

/// All epochs with their predicted samples, current epoch first.
#[wasm_bindgen]
pub fn simulation_get_epochs(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |timeline| {
        let epochs: Vec<EpochSnapshot> = timeline.epochs().map(EpochSnapshot::from).collect();
        to_js(&epochs)
    })
}

/// Trails of the bodies in the current epoch.
#[wasm_bindgen]
pub fn simulation_get_history(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |timeline| {
        let trails: Vec<TrailSnapshot> = timeline
            .current_epoch()
            .bodies()
            .iter()
            .map(|body| TrailSnapshot {
                name: body.name.clone(),
                samples: body.history().iter().map(SampleSnapshot::from).collect(),
            })
            .collect();
        to_js(&trails)
    })
}

/// Merges predicted by the last refresh.
#[wasm_bindgen]
pub fn simulation_get_collisions(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |timeline| {
        let mut collisions: Vec<CollisionSnapshot> = timeline
            .collisions()
            .iter()
            .map(|(removed, merged)| CollisionSnapshot {
                removed: removed.to_string(),
                merged: merged.to_string(),
            })
            .collect();
        collisions.sort_by(|a, b| a.removed.cmp(&b.removed));
        to_js(&collisions)
    })
}

/// Name of the body a follower of `name` should track now.
///
/// # Returns
/// `undefined` when the body was removed with no live successor
#[wasm_bindgen]
pub fn simulation_resolve_follow(sim_id: u32, name: &str) -> Result<Option<String>, JsError> {
    with_simulation(sim_id, |timeline| {
        Ok(timeline.resolve_follow(name).map(|body| body.name.clone()))
    })
}

/// View rectangle for rendering.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `follow` - Body to centre on; every future sample is framed when absent
/// * `scale` - Half-size of the followed view in body radii
#[wasm_bindgen]
pub fn simulation_get_extent(
    sim_id: u32,
    follow: Option<String>,
    scale: f64,
) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |timeline| {
        let bounds = match follow {
            Some(name) => timeline
                .follow_extent(&name, scale)
                .or_else(|| timeline.extent()),
            None => timeline.extent(),
        };
        to_js(&bounds.map(ExtentSnapshot::from))
    })
}

/// Current draft phase.
#[wasm_bindgen]
pub fn simulation_get_draft(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |timeline| to_js(timeline.draft_phase()))
}
