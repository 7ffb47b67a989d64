// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::record::EntityRecord;

/// Exact test: `true` iff the squared centre distance is within both the
/// squared radius sum and the absolute cutoff `max_range2`.
///
/// Degenerate radii count as zero. The result is symmetric in `a` and `b`
/// bit-for-bit: both the distance and the radius sum are computed from
/// operations that do not depend on operand order.
pub fn close_collision(a: &EntityRecord, b: &EntityRecord, max_range2: f64) -> bool {
    let d2 = a.position().distance_squared(&b.position());
    if d2 > max_range2 {
        return false;
    }
    let reach = a.effective_radius() + b.effective_radius();
    d2 <= reach * reach
}
