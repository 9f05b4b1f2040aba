//! Process and module descriptors

use super::{Address, ProcessId};
use serde::{Deserialize, Serialize};

/// A running process matched by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: ProcessId,
    pub name: String,
}

impl ProcessInfo {
    /// Creates a new ProcessInfo
    pub fn new(pid: ProcessId, name: impl Into<String>) -> Self {
        ProcessInfo {
            pid,
            name: name.into(),
        }
    }

    /// Case-insensitive executable name comparison
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A module image loaded in the target process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub base_address: Address,
    pub size: usize,
}

impl ModuleInfo {
    /// Creates a new ModuleInfo
    pub fn new(name: impl Into<String>, base_address: Address, size: usize) -> Self {
        ModuleInfo {
            name: name.into(),
            base_address,
            size,
        }
    }

    /// Gets the end address of the module
    pub fn end_address(&self) -> Address {
        Address::new(self.base_address.as_usize().saturating_add(self.size))
    }

    /// Checks if an address is within this module
    pub fn contains_address(&self, address: Address) -> bool {
        address >= self.base_address && address < self.end_address()
    }
}
