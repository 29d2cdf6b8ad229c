//! N-body trajectory prediction with collision merging
//!
//! The engine integrates a set of gravitating bodies forward with an
//! adaptive Runge-Kutta integrator, merges bodies that touch, and keeps the
//! result as a [`Timeline`](timeline::Timeline) of epochs that a caller can
//! tick through and render.

pub mod body;
pub mod bounds;
pub mod collisions;
pub mod draft;
pub mod epoch;
pub mod error;
pub mod forces;
pub mod input;
pub mod integrator;
pub mod scenario;
pub mod timeline;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod bounds_test;
#[cfg(test)]
mod epoch_test;
#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod scenario_test;

pub use body::{Body, Sample};
pub use error::{EngineError, IntegrationError, Result};
pub use input::{InputRecord, PointerDrag, PopulationSettings};
pub use timeline::{PopulationReport, TickOutcome, Timeline};
