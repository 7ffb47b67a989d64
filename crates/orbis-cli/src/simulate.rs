// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tick loop over a generated scene.

use anyhow::{Context, Result};
use orbis_entity::{CollisionConfig, LinearMotion, TickStats, World};
use tracing::{debug, info};

use crate::cli::SimulateArgs;
use crate::scene::{populate, SceneSpec};

/// Totals over a whole run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u32,
    pub entities: usize,
    pub totals: TickStats,
    pub peak_collisions: usize,
}

impl RunSummary {
    fn absorb(&mut self, stats: &TickStats, collisions: usize) {
        let t = &mut self.totals;
        t.entered += stats.entered;
        t.exited += stats.exited;
        t.insert_steps += stats.insert_steps;
        t.resort_swaps += stats.resort_swaps;
        t.moved += stats.moved;
        t.overlapping_pairs += stats.overlapping_pairs;
        t.filtered_pairs += stats.filtered_pairs;
        t.close_tests += stats.close_tests;
        t.collisions += stats.collisions;
        t.region_changes += stats.region_changes;
        t.diagnostics += stats.diagnostics;
        self.peak_collisions = self.peak_collisions.max(collisions);
    }
}

/// Builds the scene and runs `args.ticks` ticks with linear motion.
pub fn run(config: CollisionConfig, args: &SimulateArgs) -> Result<RunSummary> {
    let mut world = World::new(config);
    let spec = SceneSpec { entities: args.entities, seed: args.seed, spread: args.spread };
    let ids = populate(&mut world, spec)?;
    info!(entities = ids.len(), seed = args.seed, "scene ready");

    let mut summary = RunSummary { entities: ids.len(), ..RunSummary::default() };
    for _ in 0..args.ticks {
        let report = world.tick(args.dt, &mut LinearMotion);
        debug!(
            tick = report.tick.index(),
            collisions = report.collisions.len(),
            close_tests = report.stats.close_tests,
            swaps = report.stats.resort_swaps,
            "tick"
        );
        for pair in &report.collisions {
            debug!(%pair, "collision");
        }
        if args.check {
            world
                .check_invariants()
                .with_context(|| format!("invariant broken after tick {}", report.tick.index()))?;
        }
        summary.absorb(&report.stats, report.collisions.len());
        summary.ticks += 1;
    }
    info!(
        ticks = summary.ticks,
        collisions = summary.totals.collisions,
        diagnostics = summary.totals.diagnostics,
        "simulation finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_sums_every_counter() {
        let mut summary = RunSummary::default();
        let tick = TickStats { collisions: 3, diagnostics: 50, ..TickStats::default() };
        summary.absorb(&tick, 3);
        summary.absorb(&TickStats { diagnostics: 50, ..TickStats::default() }, 1);
        assert_eq!(summary.totals.diagnostics, 100);
        assert_eq!(summary.totals.collisions, 3);
        assert_eq!(summary.peak_collisions, 3);
    }
}
