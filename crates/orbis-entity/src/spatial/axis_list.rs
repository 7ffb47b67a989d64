// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::cmp::Ordering;

use tracing::debug;

/// A world axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    /// World X.
    X,
    /// World Y.
    Y,
    /// World Z.
    Z,
}

impl Axis {
    /// All three axes in index order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index (`0`, `1`, `2`).
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Read access to the sort key of every node a list may contain.
///
/// Node ids are slot indices. Implementations only need to answer for nodes
/// currently linked (or being inserted).
pub trait AxisCoordinates {
    /// Coordinate of `node` along `axis`.
    fn coordinate(&self, node: usize, axis: Axis) -> f64;
}

/// Neighbour links of one node on one axis.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AxisLink {
    /// Next lower node, `None` at the head.
    pub prev: Option<usize>,
    /// Next higher node, `None` at the tail.
    pub next: Option<usize>,
    linked: bool,
}

impl AxisLink {
    /// Whether the node is currently part of the list.
    pub const fn is_linked(&self) -> bool {
        self.linked
    }
}

/// Ascending ordering of nodes by one coordinate, maintained incrementally.
///
/// - [`insert`](Self::insert) walks outward from a hint node, so inserting
///   next to an existing neighbour costs O(k) in the distance walked.
/// - [`remove`](Self::remove) is O(1) through the stored neighbour links.
/// - [`resort`](Self::resort) moves a node whose coordinate changed past the
///   neighbours it overtook; with small per-tick displacement this is O(1)
///   amortised per node, and exactly two comparisons when nothing moved out
///   of order.
///
/// Each operation returns the number of nodes stepped over, which the world
/// folds into its per-tick statistics.
#[derive(Debug, Clone)]
pub struct SpatialAxisList {
    axis: Axis,
    links: Vec<AxisLink>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl SpatialAxisList {
    /// Creates an empty list for `axis`.
    pub const fn new(axis: Axis) -> Self {
        Self { axis, links: Vec::new(), head: None, tail: None, len: 0 }
    }

    /// Axis this list sorts by.
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of linked nodes.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowest node.
    pub const fn head(&self) -> Option<usize> {
        self.head
    }

    /// Highest node.
    pub const fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Links of `node` (all-`None`, unlinked, for nodes never inserted).
    pub fn link(&self, node: usize) -> AxisLink {
        self.links.get(node).copied().unwrap_or_default()
    }

    /// Whether `node` is currently linked.
    pub fn contains(&self, node: usize) -> bool {
        self.link(node).linked
    }

    /// Neighbour above `node`.
    pub fn next(&self, node: usize) -> Option<usize> {
        self.link(node).next
    }

    /// Neighbour below `node`.
    pub fn prev(&self, node: usize) -> Option<usize> {
        self.link(node).prev
    }

    /// Iterates nodes in ascending order.
    pub fn iter(&self) -> AxisIter<'_> {
        AxisIter { list: self, cursor: self.head }
    }

    /// Links `node` into its sorted slot, walking from `hint` (or the head
    /// when the hint is absent or not linked).
    ///
    /// Returns the number of nodes walked past, or `None` if `node` was
    /// already linked (nothing changes).
    pub fn insert(
        &mut self,
        keys: &impl AxisCoordinates,
        node: usize,
        hint: Option<usize>,
    ) -> Option<usize> {
        if self.contains(node) {
            debug!(axis = ?self.axis, node, "insert ignored: node already linked");
            return None;
        }
        if self.links.len() <= node {
            self.links.resize(node + 1, AxisLink::default());
        }

        let start = hint.filter(|&h| h != node && self.contains(h)).or(self.head);
        let Some(mut cursor) = start else {
            self.links[node] = AxisLink { prev: None, next: None, linked: true };
            self.head = Some(node);
            self.tail = Some(node);
            self.len = 1;
            return Some(0);
        };

        let mut steps = 0;
        // Walk down while the cursor sorts after the new node.
        while self.precedes(keys, node, cursor) {
            match self.links[cursor].prev {
                Some(prev) => {
                    cursor = prev;
                    steps += 1;
                }
                None => {
                    self.attach_before(node, cursor);
                    self.len += 1;
                    return Some(steps);
                }
            }
        }
        // The cursor now sorts before the new node; walk up to the last such node.
        while let Some(next) = self.links[cursor].next {
            if !self.precedes(keys, next, node) {
                break;
            }
            cursor = next;
            steps += 1;
        }
        self.attach_after(node, cursor);
        self.len += 1;
        Some(steps)
    }

    /// Unlinks `node` in O(1). Returns `false` (and changes nothing) when it
    /// was not linked.
    pub fn remove(&mut self, node: usize) -> bool {
        if !self.contains(node) {
            debug!(axis = ?self.axis, node, "remove ignored: node not linked");
            return false;
        }
        self.detach(node);
        self.links[node] = AxisLink::default();
        self.len -= 1;
        true
    }

    /// Restores order around `node` after its coordinate changed.
    ///
    /// Returns the number of neighbours the node moved past (`Some(0)` when it
    /// was already in order), or `None` when the node is not linked.
    pub fn resort(&mut self, keys: &impl AxisCoordinates, node: usize) -> Option<usize> {
        if !self.contains(node) {
            debug!(axis = ?self.axis, node, "resort ignored: node not linked");
            return None;
        }

        let mut swaps = 0;
        let mut target = None;
        let mut cursor = self.links[node].prev;
        while let Some(prev) = cursor {
            if !self.precedes(keys, node, prev) {
                break;
            }
            target = Some(prev);
            swaps += 1;
            cursor = self.links[prev].prev;
        }
        if let Some(before) = target {
            self.detach(node);
            self.attach_before(node, before);
            return Some(swaps);
        }

        cursor = self.links[node].next;
        while let Some(next) = cursor {
            if !self.precedes(keys, next, node) {
                break;
            }
            target = Some(next);
            swaps += 1;
            cursor = self.links[next].next;
        }
        if let Some(after) = target {
            self.detach(node);
            self.attach_after(node, after);
        }
        Some(swaps)
    }

    /// Whether every adjacent pair is in ascending `(coordinate, index)` order.
    pub fn is_sorted(&self, keys: &impl AxisCoordinates) -> bool {
        let mut nodes = self.iter();
        let Some(mut prev) = nodes.next() else {
            return true;
        };
        for node in nodes {
            if !self.precedes(keys, prev, node) {
                return false;
            }
            prev = node;
        }
        true
    }

    /// Strict total order: coordinate first, slot index on ties.
    fn precedes(&self, keys: &impl AxisCoordinates, a: usize, b: usize) -> bool {
        let ka = keys.coordinate(a, self.axis);
        let kb = keys.coordinate(b, self.axis);
        match ka.total_cmp(&kb) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a < b,
        }
    }

    /// Splices `node` out, repairing neighbours and head/tail. Leaves the
    /// node's own link untouched.
    fn detach(&mut self, node: usize) {
        let AxisLink { prev, next, .. } = self.links[node];
        match prev {
            Some(p) => self.links[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.links[n].prev = prev,
            None => self.tail = prev,
        }
    }

    fn attach_before(&mut self, node: usize, at: usize) {
        let prev = self.links[at].prev;
        self.links[node] = AxisLink { prev, next: Some(at), linked: true };
        self.links[at].prev = Some(node);
        match prev {
            Some(p) => self.links[p].next = Some(node),
            None => self.head = Some(node),
        }
    }

    fn attach_after(&mut self, node: usize, at: usize) {
        let next = self.links[at].next;
        self.links[node] = AxisLink { prev: Some(at), next, linked: true };
        self.links[at].next = Some(node);
        match next {
            Some(n) => self.links[n].prev = Some(node),
            None => self.tail = Some(node),
        }
    }
}

/// Ascending iterator over a [`SpatialAxisList`].
#[derive(Debug)]
pub struct AxisIter<'a> {
    list: &'a SpatialAxisList,
    cursor: Option<usize>,
}

impl Iterator for AxisIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let node = self.cursor?;
        self.cursor = self.list.next(node);
        Some(node)
    }
}
