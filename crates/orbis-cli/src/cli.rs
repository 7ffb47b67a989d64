// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity
    #[clap(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Directory holding `collision.json` (defaults to the platform config dir)
    #[clap(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a reproducible scene and run the tick loop over it
    Simulate(SimulateArgs),
    /// Print the effective collision config as JSON
    Config {
        /// Write the effective config back to the store
        #[clap(long)]
        init: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Entities to spawn
    #[clap(short, long, default_value_t = 200)]
    pub entities: u32,

    /// Ticks to run
    #[clap(short, long, default_value_t = 60)]
    pub ticks: u32,

    /// Scene seed
    #[clap(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Seconds per tick
    #[clap(long, default_value_t = 0.05)]
    pub dt: f64,

    /// Half-width of the cube entities are scattered in, in metres
    #[clap(long, default_value_t = 2000.0)]
    pub spread: f64,

    /// Verify structural invariants after every tick
    #[clap(long)]
    pub check: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
