//! Memory access for the radar
//!
//! This module provides:
//! - [`MemoryAccessor`]: attach/detach lifecycle and module-relative addressing
//! - [`ReadMemory`]: typed little-endian reads on top of a raw byte copy
//! - [`mock`]: an in-memory process backend

pub mod accessor;
pub mod mock;
pub mod reader;

pub use accessor::{ConnectionState, MemoryAccessor, ModuleHandle, ModuleSlot};
pub use mock::{MockBackend, MockProcess};
pub use reader::ReadMemory;
