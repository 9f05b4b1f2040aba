//! Core type definitions for Mini-Radar
//!
//! Addresses, process/module descriptors, entity and player records, and the
//! error taxonomy shared by every layer.

mod address;
mod error;
mod player;
mod process_info;
mod team;

// Re-export all public types
pub use address::Address;
pub use error::{RadarError, RadarResult};
pub use player::{DisplayPoint, EntityState, PlayerRecord, TeamCounts};
pub use process_info::{ModuleInfo, ProcessInfo};
pub use team::Team;

// Common type aliases
pub type ProcessId = u32;
pub type Offset = usize;
