//! Which body each merged-away body turned into

use log::warn;
use serde::Serialize;
use std::collections::HashMap;

/// Maps the name of every body removed by a predicted merge to the name of
/// the body that replaced it
///
/// Rebuilt from scratch on every population pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollisionRecord {
    merges: HashMap<String, String>,
}

impl CollisionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, removed: impl Into<String>, merged: impl Into<String>) {
        self.merges.insert(removed.into(), merged.into());
    }

    pub fn get(&self, removed: &str) -> Option<&str> {
        self.merges.get(removed).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.merges.clear();
    }

    pub fn len(&self) -> usize {
        self.merges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.merges.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Follows the merge chain from `name` until `is_live` accepts a name.
    ///
    /// `lookup` supplies extra edges (for example the merge that opened
    /// the current epoch) and is consulted before the record. The chase
    /// gives up after `cap` hops.
    ///
    /// # Examples
    ///
    /// ```
    /// use trajectory::collisions::CollisionRecord;
    ///
    /// let mut record = CollisionRecord::new();
    /// record.insert("Moon", "Earth + Moon");
    /// record.insert("Earth + Moon", "Earth + Moon + Venus");
    ///
    /// let live = |name: &str| name == "Earth + Moon + Venus";
    /// let found = record.resolve("Moon", live, |_| None, 8);
    /// assert_eq!(found.as_deref(), Some("Earth + Moon + Venus"));
    /// ```
    pub fn resolve<'a>(
        &'a self,
        name: &'a str,
        is_live: impl Fn(&str) -> bool,
        lookup: impl Fn(&str) -> Option<&'a str>,
        cap: usize,
    ) -> Option<String> {
        let mut current = name;
        for _ in 0..=cap {
            if is_live(current) {
                return Some(current.to_string());
            }
            current = lookup(current).or_else(|| self.get(current))?;
        }

        warn!("gave up following {name} after {cap} merges");
        None
    }
}
