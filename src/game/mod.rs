//! Game-specific knowledge: where entities live and how they map onto the radar
//!
//! - [`offsets`]: the static offset table for one client build
//! - [`entity`]: per-tick snapshot of the local player and living entities
//! - [`radar`]: classification, projection and frame assembly
//! - [`maps`]: world bounds per map

pub mod entity;
pub mod maps;
pub mod mock;
pub mod offsets;
pub mod radar;

pub use entity::{Snapshot, SnapshotBuilder, MAX_PLAUSIBLE_HEALTH};
pub use maps::{bounds_for, is_known_map, known_maps, MapBounds, DEFAULT_MAP};
pub use offsets::OffsetTable;
pub use radar::{classify, project, project_with, Classifier, RadarFrame};
