// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Orbis CLI entrypoint.
//!
//! # Usage
//! ```text
//! orbis simulate [--entities N] [--ticks N] [--seed S] [--dt SECONDS]
//!                [--spread METRES] [--check]
//! orbis config [--init]
//! ```
//!
//! Both commands read `collision.json` from `--config-dir` (or the platform
//! config directory); a missing file means defaults. The CLI exits with code
//! `0` on success and non-zero on error.

// The CLI is expected to print to stdout.
#![allow(clippy::print_stdout)]

mod cli;
mod scene;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::Table;
use orbis_config::{ConfigService, FsConfigStore};
use orbis_entity::CollisionConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Command};
use crate::simulate::RunSummary;

const CONFIG_KEY: &str = "collision";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;

    let store = match &cli.config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    }
    .context("opening config store")?;
    let service = ConfigService::new(store);
    let config = service
        .load_or_default::<CollisionConfig>(CONFIG_KEY)
        .context("loading collision config")?
        .sanitized();

    match cli.command {
        Command::Simulate(args) => {
            let summary = simulate::run(config, &args)?;
            println!("{}", summary_table(&summary));
        }
        Command::Config { init } => {
            if init {
                service.save(CONFIG_KEY, &config).context("saving collision config")?;
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

fn summary_table(summary: &RunSummary) -> Table {
    let t = &summary.totals;
    let mut table = Table::new();
    table.set_header(vec!["metric", "value"]);
    let rows: [(&str, u64); 11] = [
        ("ticks", u64::from(summary.ticks)),
        ("entities", summary.entities as u64),
        ("moved", t.moved),
        ("resort swaps", t.resort_swaps),
        ("overlapping pairs", t.overlapping_pairs),
        ("filtered pairs", t.filtered_pairs),
        ("close tests", t.close_tests),
        ("collisions", t.collisions),
        ("peak collisions / tick", summary.peak_collisions as u64),
        ("region changes", t.region_changes),
        ("diagnostics", t.diagnostics),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_owned(), value.to_string()]);
    }
    table
}
