// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Beacon list: in-world entities carrying a beacon code, ordered by code.
//!
//! Kept for navigation/HUD traversal only; collision never looks at it. Links
//! follow the same discipline as the axis lists: slot indices stored in the
//! list, never ownership of the entities.

use core::cmp::Ordering;

use tracing::debug;

/// Read access to beacon codes by slot index.
pub trait BeaconCodes {
    /// Code of `node`; the empty string for nodes without one.
    fn beacon_code(&self, node: usize) -> &str;
}

/// Orders two codes case-insensitively, then exactly.
pub fn compare_beacon_codes(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
struct BeaconLink {
    prev: Option<usize>,
    next: Option<usize>,
    linked: bool,
}

/// Doubly linked list of beacon entities in code order.
#[derive(Debug, Clone, Default)]
pub struct BeaconList {
    links: Vec<BeaconLink>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl BeaconList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of beacons.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no beacons.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `node` is linked.
    pub fn contains(&self, node: usize) -> bool {
        self.links.get(node).is_some_and(|l| l.linked)
    }

    /// Beacon after `node` in code order.
    pub fn next(&self, node: usize) -> Option<usize> {
        self.links.get(node).and_then(|l| l.next)
    }

    /// Beacon before `node` in code order.
    pub fn prev(&self, node: usize) -> Option<usize> {
        self.links.get(node).and_then(|l| l.prev)
    }

    /// First beacon in code order.
    pub const fn first(&self) -> Option<usize> {
        self.head
    }

    /// Last beacon in code order.
    pub const fn last(&self) -> Option<usize> {
        self.tail
    }

    /// Iterates beacons in code order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self.head;
        core::iter::from_fn(move || {
            let node = cursor?;
            cursor = self.next(node);
            Some(node)
        })
    }

    /// Links `node` at its ordered position. Returns `false` if already linked.
    pub fn insert(&mut self, codes: &impl BeaconCodes, node: usize) -> bool {
        if self.contains(node) {
            debug!(node, "beacon insert ignored: already linked");
            return false;
        }
        if self.links.len() <= node {
            self.links.resize(node + 1, BeaconLink::default());
        }

        // Last node that sorts before `node`, scanning from the head.
        let mut after = None;
        let mut cursor = self.head;
        while let Some(current) = cursor {
            if !precedes(codes, current, node) {
                break;
            }
            after = Some(current);
            cursor = self.links[current].next;
        }

        let next = match after {
            Some(a) => self.links[a].next,
            None => self.head,
        };
        self.links[node] = BeaconLink { prev: after, next, linked: true };
        match after {
            Some(a) => self.links[a].next = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(n) => self.links[n].prev = Some(node),
            None => self.tail = Some(node),
        }
        self.len += 1;
        true
    }

    /// Unlinks `node` in O(1). Returns `false` if it was not linked.
    pub fn remove(&mut self, node: usize) -> bool {
        if !self.contains(node) {
            return false;
        }
        let BeaconLink { prev, next, .. } = self.links[node];
        match prev {
            Some(p) => self.links[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.links[n].prev = prev,
            None => self.tail = prev,
        }
        self.links[node] = BeaconLink::default();
        self.len -= 1;
        true
    }

    /// Whether adjacent beacons are in code order.
    pub fn is_sorted(&self, codes: &impl BeaconCodes) -> bool {
        let nodes: Vec<usize> = self.iter().collect();
        nodes.windows(2).all(|w| precedes(codes, w[0], w[1]))
    }
}

fn precedes(codes: &impl BeaconCodes, a: usize, b: usize) -> bool {
    match compare_beacon_codes(codes.beacon_code(a), codes.beacon_code(b)) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => a < b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Codes(Vec<&'static str>);

    impl BeaconCodes for Codes {
        fn beacon_code(&self, node: usize) -> &str {
            self.0[node]
        }
    }

    #[test]
    fn codes_compare_case_insensitively_first() {
        assert_eq!(compare_beacon_codes("alpha", "Bravo"), Ordering::Less);
        assert_eq!(compare_beacon_codes("B", "b"), Ordering::Less);
        assert_eq!(compare_beacon_codes("x", "x"), Ordering::Equal);
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let codes = Codes(vec!["N", "a", "Z", "m"]);
        let mut list = BeaconList::new();
        for node in 0..4 {
            assert!(list.insert(&codes, node));
        }
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 3, 0, 2]);
        assert!(list.remove(3));
        assert!(!list.remove(3));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 0, 2]);
        assert!(list.is_sorted(&codes));
        assert_eq!(list.prev(0), Some(1));
        assert_eq!(list.next(0), Some(2));
    }
}
