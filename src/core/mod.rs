//! Core module containing fundamental types for Mini-Radar
//!
//! This module provides the foundational building blocks used throughout
//! the crate: remote addresses, process and module descriptors, player
//! records, and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Address, DisplayPoint, EntityState, ModuleInfo, PlayerRecord, ProcessInfo, RadarError,
    RadarResult, Team, TeamCounts,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Mini-Radar requires 64-bit architecture");
