// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Configuration for Orbis tools: a JSON-serializing service over a
//! pluggable blob store.
//!
//! [`ConfigService`] owns (de)serialization; a [`ConfigStore`] only moves
//! bytes under a logical key. [`FsConfigStore`] keeps one `<key>.json` file
//! per key in the platform config directory (or any directory you hand it),
//! and [`MemoryConfigStore`] backs tests.

mod fs_store;
mod memory;
mod service;

pub use fs_store::FsConfigStore;
pub use memory::MemoryConfigStore;
pub use service::{ConfigError, ConfigService, ConfigStore};
