// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entity handles.

use core::fmt;

/// Handle identifying one entity in the [`World`](crate::World) table.
///
/// `index` is a small dense integer (the slot), unique among live entities.
/// `generation` changes every time a slot is released, so a handle kept past
/// its entity's release resolves to "absent" instead of aliasing whichever
/// entity reuses the slot. Owner links and collision sets store these
/// handles; they never keep an entity alive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct UniversalId {
    index: u32,
    generation: u32,
}

impl UniversalId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index; doubles as the stable secondary sort key on every axis.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at the time the handle was issued.
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    pub(crate) const fn node(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for UniversalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
