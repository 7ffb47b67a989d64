// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Simulation tick counter.
///
/// The world advances one tick per frame; handles released during a tick
/// stay reserved until the next one begins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick {
    index: u64,
}

impl Tick {
    /// Creates a tick with the given index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }

    /// Returns the tick index.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// The tick after this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self { index: self.index + 1 }
    }
}
