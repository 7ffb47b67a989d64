// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::record::EntityRecord;
use crate::status::ScanClass;

/// Which overlapping pairs are allowed to reach the exact test.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionRules {
    /// Classes that never collide with anything.
    pub immune_classes: Vec<ScanClass>,
    /// Unordered class pairs that never collide with each other.
    pub immune_pairs: Vec<(ScanClass, ScanClass)>,
}

impl Default for CollisionRules {
    fn default() -> Self {
        Self {
            immune_classes: vec![ScanClass::NoDraw, ScanClass::VisualEffect],
            immune_pairs: Vec::new(),
        }
    }
}

impl CollisionRules {
    /// Rules with no immunity at all.
    pub fn permissive() -> Self {
        Self { immune_classes: Vec::new(), immune_pairs: Vec::new() }
    }

    /// Adds a mutually immune pair.
    #[must_use]
    pub fn with_immune_pair(mut self, a: ScanClass, b: ScanClass) -> Self {
        self.immune_pairs.push((a, b));
        self
    }

    /// Adds a class that never collides.
    #[must_use]
    pub fn with_immune_class(mut self, class: ScanClass) -> Self {
        self.immune_classes.push(class);
        self
    }

    /// Class-level check, symmetric in its arguments.
    pub fn classes_may_collide(&self, a: ScanClass, b: ScanClass) -> bool {
        if self.immune_classes.contains(&a) || self.immune_classes.contains(&b) {
            return false;
        }
        !self.immune_pairs.iter().any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// Cheap per-pair filters applied before the exact test: the 2-bit test
    /// filter, the per-entity immunity flag, and the class rules.
    pub fn may_collide(&self, a: &EntityRecord, b: &EntityRecord) -> bool {
        a.collision_filter().admits(b.collision_filter())
            && !a.flags().immune_to_collision
            && !b.flags().immune_to_collision
            && self.classes_may_collide(a.scan_class(), b.scan_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_immunity_is_symmetric() {
        let rules = CollisionRules::permissive().with_immune_pair(ScanClass::Police, ScanClass::Station);
        assert!(!rules.classes_may_collide(ScanClass::Police, ScanClass::Station));
        assert!(!rules.classes_may_collide(ScanClass::Station, ScanClass::Police));
        assert!(rules.classes_may_collide(ScanClass::Police, ScanClass::Police));
    }

    #[test]
    fn default_rules_exempt_no_draw_and_effects() {
        let rules = CollisionRules::default();
        assert!(!rules.classes_may_collide(ScanClass::NoDraw, ScanClass::Neutral));
        assert!(!rules.classes_may_collide(ScanClass::Neutral, ScanClass::VisualEffect));
        assert!(rules.classes_may_collide(ScanClass::Neutral, ScanClass::Rock));
    }

    #[test]
    fn rules_deserialize_from_class_names() {
        let json = r#"{"immune_pairs":[["CLASS_MINE","CLASS_MINE"]]}"#;
        let rules: CollisionRules = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(rules.immune_pairs, vec![(ScanClass::Mine, ScanClass::Mine)]);
        assert_eq!(rules.immune_classes, CollisionRules::default().immune_classes);
    }
}
