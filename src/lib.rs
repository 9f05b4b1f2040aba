//! Mini-Radar library: an external 2-D radar for a running game client
//!
//! Reads player entities from the target's memory through a fixed offset
//! table, classifies them against the local player, and projects them onto
//! a square display.

pub mod config;
pub mod core;
pub mod game;
pub mod memory;
pub mod poller;
pub mod process;
#[cfg(windows)]
pub mod windows;

// Re-export main types from core module
pub use crate::core::types::{
    Address, DisplayPoint, EntityState, ModuleInfo, PlayerRecord, ProcessId, ProcessInfo,
    RadarError, RadarResult, Team, TeamCounts,
};

pub use crate::config::Config;
pub use crate::game::{Classifier, OffsetTable, RadarFrame, Snapshot, SnapshotBuilder};
pub use crate::memory::{ConnectionState, MemoryAccessor, ReadMemory};
pub use crate::poller::{PollState, Poller, RadarHandle, ShutdownSignal};
