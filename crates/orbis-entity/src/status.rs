// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lifecycle status and scan classification.
//!
//! Both enums round-trip through their historical `STATUS_*` / `CLASS_*`
//! names and raw integers. Unrecognised input never fails: it is coerced to
//! [`EntityStatus::DEFAULT`] / [`ScanClass::DEFAULT`] and logged.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lifecycle state gating membership in the spatial lists.
///
/// `Inactive → Active → Dead` is the only legal progression; a dead entity
/// never comes back, a fresh handle is spawned instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntityStatus {
    /// Created but not yet in the world; not linked into any list.
    Inactive,
    /// In the world (in flight); linked into all three axis lists.
    Active,
    /// Removed from the world; unlinked, handle released.
    Dead,
}

impl EntityStatus {
    /// Value used for unknown names and out-of-range raw values.
    pub const DEFAULT: Self = Self::Inactive;

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inactive => "STATUS_INACTIVE",
            Self::Active => "STATUS_ACTIVE",
            Self::Dead => "STATUS_DEAD",
        }
    }

    /// Strict name lookup. `STATUS_IN_FLIGHT` is accepted as an alias of active.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "STATUS_INACTIVE" => Some(Self::Inactive),
            "STATUS_ACTIVE" | "STATUS_IN_FLIGHT" => Some(Self::Active),
            "STATUS_DEAD" => Some(Self::Dead),
            _ => None,
        }
    }

    /// Lenient name lookup: unknown names become [`Self::DEFAULT`].
    pub fn from_name_lossy(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(name, "unknown entity status; using {}", Self::DEFAULT.name());
            Self::DEFAULT
        })
    }

    /// Raw value as stored by external state.
    pub const fn raw(self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
            Self::Dead => 2,
        }
    }

    /// Lenient raw lookup: out-of-range values become [`Self::DEFAULT`].
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Inactive,
            1 => Self::Active,
            2 => Self::Dead,
            other => {
                warn!(raw = other, "out-of-range entity status; using {}", Self::DEFAULT.name());
                Self::DEFAULT
            }
        }
    }

    /// Whether an entity in this state must be linked into the spatial lists.
    pub const fn is_in_world(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scanner classification; drives collision immunity rules.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ScanClass {
    /// Not yet classified.
    #[serde(rename = "CLASS_NOT_SET")]
    NotSet,
    /// The player's own vessel.
    #[serde(rename = "CLASS_PLAYER")]
    Player,
    /// Present in the world but never drawn on the scanner.
    #[serde(rename = "CLASS_NO_DRAW")]
    NoDraw,
    /// Ordinary traffic.
    #[serde(rename = "CLASS_NEUTRAL")]
    Neutral,
    /// Police vessels.
    #[serde(rename = "CLASS_POLICE")]
    Police,
    /// Stations and carriers.
    #[serde(rename = "CLASS_STATION")]
    Station,
    /// Unidentified target.
    #[serde(rename = "CLASS_TARGET")]
    Target,
    /// Cargo pods and debris.
    #[serde(rename = "CLASS_CARGO")]
    Cargo,
    /// Missiles.
    #[serde(rename = "CLASS_MISSILE")]
    Missile,
    /// Asteroids and boulders.
    #[serde(rename = "CLASS_ROCK")]
    Rock,
    /// Mines.
    #[serde(rename = "CLASS_MINE")]
    Mine,
    /// Alien vessels.
    #[serde(rename = "CLASS_THARGOID")]
    Thargoid,
    /// Navigation buoys.
    #[serde(rename = "CLASS_BUOY")]
    Buoy,
    /// Wormholes.
    #[serde(rename = "CLASS_WORMHOLE")]
    Wormhole,
    /// Military vessels.
    #[serde(rename = "CLASS_MILITARY")]
    Military,
    /// Visual effects.
    #[serde(rename = "CLASS_VISUAL_EFFECT")]
    VisualEffect,
}

impl ScanClass {
    /// Value used for unknown names and out-of-range raw values.
    pub const DEFAULT: Self = Self::NotSet;

    /// Every class, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::NotSet,
        Self::Player,
        Self::NoDraw,
        Self::Neutral,
        Self::Police,
        Self::Station,
        Self::Target,
        Self::Cargo,
        Self::Missile,
        Self::Rock,
        Self::Mine,
        Self::Thargoid,
        Self::Buoy,
        Self::Wormhole,
        Self::Military,
        Self::VisualEffect,
    ];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotSet => "CLASS_NOT_SET",
            Self::Player => "CLASS_PLAYER",
            Self::NoDraw => "CLASS_NO_DRAW",
            Self::Neutral => "CLASS_NEUTRAL",
            Self::Police => "CLASS_POLICE",
            Self::Station => "CLASS_STATION",
            Self::Target => "CLASS_TARGET",
            Self::Cargo => "CLASS_CARGO",
            Self::Missile => "CLASS_MISSILE",
            Self::Rock => "CLASS_ROCK",
            Self::Mine => "CLASS_MINE",
            Self::Thargoid => "CLASS_THARGOID",
            Self::Buoy => "CLASS_BUOY",
            Self::Wormhole => "CLASS_WORMHOLE",
            Self::Military => "CLASS_MILITARY",
            Self::VisualEffect => "CLASS_VISUAL_EFFECT",
        }
    }

    /// Raw value as stored by external state.
    pub const fn raw(self) -> i32 {
        match self {
            Self::NotSet => -1,
            Self::Player => -2,
            Self::NoDraw => 0,
            Self::Neutral => 1,
            Self::Police => 2,
            Self::Station => 3,
            Self::Target => 4,
            Self::Cargo => 5,
            Self::Missile => 6,
            Self::Rock => 7,
            Self::Mine => 8,
            Self::Thargoid => 9,
            Self::Buoy => 10,
            Self::Military => 12,
            Self::VisualEffect => 13,
            Self::Wormhole => 444,
        }
    }

    /// Strict name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }

    /// Lenient name lookup: unknown names become [`Self::DEFAULT`].
    pub fn from_name_lossy(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(name, "unknown scan class; using {}", Self::DEFAULT.name());
            Self::DEFAULT
        })
    }

    /// Lenient raw lookup: out-of-range values become [`Self::DEFAULT`].
    pub fn from_raw(raw: i32) -> Self {
        Self::ALL.into_iter().find(|class| class.raw() == raw).unwrap_or_else(|| {
            warn!(raw, "out-of-range scan class; using {}", Self::DEFAULT.name());
            Self::DEFAULT
        })
    }
}

impl Default for ScanClass {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScanClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip() {
        for status in [EntityStatus::Inactive, EntityStatus::Active, EntityStatus::Dead] {
            assert_eq!(EntityStatus::from_name(status.name()), Some(status));
            assert_eq!(EntityStatus::from_raw(status.raw()), status);
        }
        assert_eq!(EntityStatus::from_name("STATUS_IN_FLIGHT"), Some(EntityStatus::Active));
    }

    #[test]
    fn unknown_status_is_coerced_to_inactive() {
        assert_eq!(EntityStatus::from_name_lossy("STATUS_BOGUS"), EntityStatus::Inactive);
        assert_eq!(EntityStatus::from_raw(200), EntityStatus::Inactive);
    }

    #[test]
    fn scan_class_names_and_raw_values_are_unique() {
        for class in ScanClass::ALL {
            assert_eq!(ScanClass::from_name(class.name()), Some(class));
            assert_eq!(ScanClass::from_raw(class.raw()), class);
        }
    }

    #[test]
    fn unknown_scan_class_is_coerced_to_not_set() {
        assert_eq!(ScanClass::from_name_lossy("CLASS_DRAGON"), ScanClass::NotSet);
        assert_eq!(ScanClass::from_raw(9999), ScanClass::NotSet);
    }

    #[test]
    fn scan_class_serializes_by_name() {
        let json = serde_json::to_string(&ScanClass::Missile).unwrap_or_default();
        assert_eq!(json, "\"CLASS_MISSILE\"");
    }
}
