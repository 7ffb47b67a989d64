// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entity kinds, per-entity flags, and the 2-bit collision test filter.

/// What an entity is. Capabilities are derived from the kind instead of
/// being carried as independent type bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    /// Any ship not covered by a more specific kind.
    Ship,
    /// Dockable station.
    Station,
    /// The player's ship.
    Player,
    /// Planet or moon.
    Planet,
    /// Star.
    Sun,
    /// Wormhole.
    Wormhole,
    /// Visual effect (no physical presence).
    VisualEffect,
    /// Navigation waypoint.
    Waypoint,
    /// Sky backdrop.
    Sky,
}

impl EntityKind {
    /// Whether entities of this kind take part in the broad phase at all.
    pub const fn is_collidable(self) -> bool {
        matches!(
            self,
            Self::Ship | Self::Station | Self::Player | Self::Planet | Self::Sun | Self::Wormhole
        )
    }

    /// Whether entities of this kind may appear in the beacon list.
    pub const fn is_beacon_capable(self) -> bool {
        matches!(
            self,
            Self::Ship
                | Self::Station
                | Self::Player
                | Self::Wormhole
                | Self::VisualEffect
                | Self::Waypoint
        )
    }

    /// Ships, stations, and the player.
    pub const fn is_ship(self) -> bool {
        matches!(self, Self::Ship | Self::Station | Self::Player)
    }

    /// Planets and suns.
    pub const fn is_stellar_object(self) -> bool {
        matches!(self, Self::Planet | Self::Sun)
    }
}

/// Per-entity boolean state.
///
/// The first group is set by the spawner; the motion flags are rewritten by
/// the world every tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct EntityFlags {
    /// Rigidly attached to its owner (turret, docking bay, ...).
    pub is_sub_entity: bool,
    /// Never collides with anything, whatever the scan-class rules say.
    pub immune_to_collision: bool,
    /// Emits sparks (cosmetic; exposed to the render collaborator).
    pub throw_sparks: bool,
    /// Lit by the system sun.
    pub is_sunlit: bool,
    /// Position changed during the current tick.
    pub has_moved: bool,
    /// Orientation changed during the current tick.
    pub has_rotated: bool,
    /// Collided with something during the current tick.
    pub has_collided: bool,
}

/// 2-bit collision test filter.
///
/// Two entities are tested against each other only when their masks share a
/// bit. [`CollisionFilter::ALL`] is the default; [`CollisionFilter::NONE`]
/// opts an entity out of pairwise testing without removing it from the lists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CollisionFilter(u8);

impl CollisionFilter {
    /// Matches nothing.
    pub const NONE: Self = Self(0b00);
    /// Matches every non-empty mask.
    pub const ALL: Self = Self(0b11);

    /// Builds a filter from the low two bits of `bits`.
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Raw mask bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether a pair with these two filters survives the mask test.
    pub const fn admits(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_masks_to_two_bits() {
        assert_eq!(CollisionFilter::new(0xff).bits(), 0b11);
        assert_eq!(CollisionFilter::new(0b100).bits(), 0);
    }

    #[test]
    fn filter_requires_shared_bit() {
        let a = CollisionFilter::new(0b01);
        let b = CollisionFilter::new(0b10);
        assert!(!a.admits(b));
        assert!(a.admits(CollisionFilter::ALL));
        assert!(!CollisionFilter::NONE.admits(CollisionFilter::ALL));
    }

    #[test]
    fn effects_and_waypoints_never_collide() {
        assert!(!EntityKind::VisualEffect.is_collidable());
        assert!(!EntityKind::Waypoint.is_collidable());
        assert!(EntityKind::Waypoint.is_beacon_capable());
        assert!(!EntityKind::Planet.is_beacon_capable());
    }

    #[test]
    fn kind_groups() {
        assert!(EntityKind::Station.is_ship());
        assert!(EntityKind::Player.is_ship());
        assert!(!EntityKind::Wormhole.is_ship());
        assert!(EntityKind::Sun.is_stellar_object());
        assert!(!EntityKind::Ship.is_stellar_object());
    }
}
