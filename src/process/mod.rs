//! Process discovery and handle management
//!
//! The accessor talks to the target through two traits: a
//! [`ProcessBackend`] that finds and opens processes, and the
//! [`ProcessMemory`] handle it returns. The Windows implementation lives in
//! [`windows_backend`]; an in-memory one lives in `memory::mock`.

#[cfg(windows)]
pub mod enumerator;
#[cfg(windows)]
pub mod handle;
#[cfg(windows)]
pub mod modules;
#[cfg(windows)]
pub mod windows_backend;

#[cfg(windows)]
pub use enumerator::{find_process_by_name, ProcessEnumerator};
#[cfg(windows)]
pub use handle::{ProcessAccess, ProcessHandle};
#[cfg(windows)]
pub use modules::ModuleEnumerator;
#[cfg(windows)]
pub use windows_backend::WindowsBackend;

use crate::core::types::{Address, ModuleInfo, ProcessId, ProcessInfo, RadarResult};

/// An open handle to a target process.
pub trait ProcessMemory {
    /// Process ID behind this handle
    fn pid(&self) -> ProcessId;

    /// Fill `buffer` from the target's address space.
    ///
    /// A short read is an error; the caller never sees half-filled buffers.
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> RadarResult<()>;

    /// Locate a loaded module by name (case-insensitive)
    fn find_module(&self, name: &str) -> RadarResult<ModuleInfo>;

    /// False once the process has exited
    fn is_running(&self) -> bool;
}

/// Finds and opens target processes.
pub trait ProcessBackend {
    type Process: ProcessMemory;

    /// First running process whose executable name matches `name`
    fn find_process(&self, name: &str) -> RadarResult<ProcessInfo>;

    /// Open a read handle to `process`
    fn open(&self, process: &ProcessInfo) -> RadarResult<Self::Process>;
}

/// Backend for the host platform
#[cfg(windows)]
pub fn platform_backend() -> WindowsBackend {
    WindowsBackend::new()
}
