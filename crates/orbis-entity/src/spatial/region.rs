// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::BTreeSet;

use orbis_math::HpVec3;
use rustc_hash::FxHashMap;

use crate::ident::UniversalId;

/// Widest query, in cells from the centre cell along each axis.
const MAX_QUERY_SPAN: i64 = 8;

/// Coarse cubic cell an entity was last seen in.
///
/// Non-authoritative: refreshed when an entity crosses a cell boundary and
/// used only for proximity queries outside the collision path.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RegionTag {
    /// Cell index along X.
    pub x: i64,
    /// Cell index along Y.
    pub y: i64,
    /// Cell index along Z.
    pub z: i64,
}

/// Uniform grid of region cells with a membership index.
#[derive(Debug, Clone)]
pub struct RegionGrid {
    cell_size: f64,
    members: FxHashMap<RegionTag, BTreeSet<UniversalId>>,
}

impl RegionGrid {
    /// Creates a grid with cubic cells of `cell_size` metres.
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size, members: FxHashMap::default() }
    }

    /// Cell edge length.
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing `position`. Non-finite components land in cell 0.
    pub fn tag_for(&self, position: &HpVec3) -> RegionTag {
        let cell = |v: f64| {
            let c = (v / self.cell_size).floor();
            if c.is_finite() {
                c as i64
            } else {
                0
            }
        };
        RegionTag { x: cell(position.x()), y: cell(position.y()), z: cell(position.z()) }
    }

    /// Files `id` under the cell for `position`, moving it out of `previous`
    /// if that differs. Returns the new tag and whether it changed.
    pub fn assign(
        &mut self,
        id: UniversalId,
        previous: Option<RegionTag>,
        position: &HpVec3,
    ) -> (RegionTag, bool) {
        let tag = self.tag_for(position);
        if previous == Some(tag) {
            return (tag, false);
        }
        if let Some(old) = previous {
            self.remove(id, old);
        }
        self.members.entry(tag).or_default().insert(id);
        (tag, true)
    }

    /// Drops `id` from `tag`'s membership.
    pub fn remove(&mut self, id: UniversalId, tag: RegionTag) {
        if let Some(set) = self.members.get_mut(&tag) {
            set.remove(&id);
            if set.is_empty() {
                self.members.remove(&tag);
            }
        }
    }

    /// Members of one cell, in handle order.
    pub fn members(&self, tag: RegionTag) -> impl Iterator<Item = UniversalId> + '_ {
        self.members.get(&tag).into_iter().flat_map(|set| set.iter().copied())
    }

    /// Members of every cell overlapping the cube of half-size `radius`
    /// around `center`, sorted by handle. The cube is clamped to
    /// `MAX_QUERY_SPAN` cells each way from the centre cell.
    pub fn members_near(&self, center: &HpVec3, radius: f64) -> Vec<UniversalId> {
        let mid = self.tag_for(center);
        let reach = if radius.is_finite() && radius > 0.0 {
            ((radius / self.cell_size).ceil() as i64).min(MAX_QUERY_SPAN)
        } else {
            0
        };
        let span = |c: i64| c.saturating_sub(reach)..=c.saturating_add(reach);
        let mut out = BTreeSet::new();
        for x in span(mid.x) {
            for y in span(mid.y) {
                for z in span(mid.z) {
                    out.extend(self.members(RegionTag { x, y, z }));
                }
            }
        }
        out.into_iter().collect()
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.members.len()
    }
}
