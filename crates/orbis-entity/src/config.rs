// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tunables for the broad phase, close test, and lifecycle.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::broad::CollisionRules;

/// Squared cutoff past which two entities never collide.
pub const DEFAULT_MAX_RANGE2: f64 = 1.0e9;
/// Region cell edge in metres (one scanner range).
pub const DEFAULT_REGION_CELL_SIZE: f64 = 25_600.0;
/// Owner chain bound.
pub const DEFAULT_MAX_OWNER_DEPTH: u32 = 8;
/// Handle slots.
pub const DEFAULT_MAX_ENTITIES: u32 = 4096;

/// World configuration, stored as JSON under the `collision` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Absolute squared-distance cutoff for the close test.
    pub max_range2: f64,
    /// Edge length of one region cell.
    pub region_cell_size: f64,
    /// Maximum number of owner links followed when resolving a root owner.
    pub max_owner_depth: u32,
    /// Size of the handle space.
    pub max_entities: u32,
    /// Drop pairs whose collision roots are the same entity.
    pub ignore_shared_owner: bool,
    /// Class immunity rules.
    pub rules: CollisionRules,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            max_range2: DEFAULT_MAX_RANGE2,
            region_cell_size: DEFAULT_REGION_CELL_SIZE,
            max_owner_depth: DEFAULT_MAX_OWNER_DEPTH,
            max_entities: DEFAULT_MAX_ENTITIES,
            ignore_shared_owner: true,
            rules: CollisionRules::default(),
        }
    }
}

impl CollisionConfig {
    /// Replaces unusable values with their defaults, warning for each.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(self.max_range2.is_finite() && self.max_range2 > 0.0) {
            warn!(value = self.max_range2, "max_range2 unusable; using default");
            self.max_range2 = DEFAULT_MAX_RANGE2;
        }
        if !(self.region_cell_size.is_finite() && self.region_cell_size > 0.0) {
            warn!(value = self.region_cell_size, "region_cell_size unusable; using default");
            self.region_cell_size = DEFAULT_REGION_CELL_SIZE;
        }
        if self.max_owner_depth == 0 {
            warn!("max_owner_depth is zero; using default");
            self.max_owner_depth = DEFAULT_MAX_OWNER_DEPTH;
        }
        if self.max_entities == 0 {
            warn!("max_entities is zero; using default");
            self.max_entities = DEFAULT_MAX_ENTITIES;
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_restores_defaults() {
        let cfg = CollisionConfig {
            max_range2: f64::NAN,
            region_cell_size: -1.0,
            max_owner_depth: 0,
            max_entities: 0,
            ..CollisionConfig::default()
        }
        .sanitized();
        assert_eq!(cfg, CollisionConfig::default());
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let cfg = CollisionConfig { max_range2: 4.0, max_owner_depth: 2, ..CollisionConfig::default() };
        assert_eq!(cfg.clone().sanitized(), cfg);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: CollisionConfig =
            serde_json::from_str(r#"{"max_entities": 16}"#).expect("parse partial config");
        assert_eq!(cfg.max_entities, 16);
        assert!(cfg.ignore_shared_owner);
        assert!((cfg.max_range2 - DEFAULT_MAX_RANGE2).abs() < f64::EPSILON);
    }
}
