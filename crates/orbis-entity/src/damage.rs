// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Energy damage hand-off.
//!
//! The world validates the handles involved and forwards the request; it
//! never decides what damage does to an entity. That belongs to whoever
//! implements [`DamagePort`].

use orbis_math::HpVec3;

use crate::ident::UniversalId;

/// One forwarded energy damage request.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EnergyDamage {
    /// Entity being damaged.
    pub target: UniversalId,
    /// Entity responsible, if it is still alive.
    pub source: Option<UniversalId>,
    /// Energy to remove.
    pub amount: f64,
    /// Target position when the request was forwarded.
    pub position: HpVec3,
}

/// Receiver of forwarded damage requests.
pub trait DamagePort {
    /// Handles one request.
    fn take_energy_damage(&mut self, damage: EnergyDamage);
}

impl DamagePort for Vec<EnergyDamage> {
    fn take_energy_damage(&mut self, damage: EnergyDamage) {
        self.push(damage);
    }
}
