//! Collision detection and resolution
//!
//! Bodies are treated as spheres. The first overlapping pair found in an
//! epoch ends it: the pair merges and the survivors continue in a new epoch.

pub mod detection;
pub mod record;
pub mod resolution;

#[cfg(test)]
mod record_test;

pub use detection::{find_first_overlap, CollisionEvent};
pub use record::CollisionRecord;
pub use resolution::{merge_bodies, merged_name, split_epoch};
