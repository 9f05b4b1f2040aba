//! Process handle wrapper with RAII semantics

use crate::core::types::{Address, ProcessId, RadarError, RadarResult};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use std::fmt;
use winapi::um::winnt::HANDLE;

/// Access rights for process handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Read memory access
    pub const VM_READ: Self = Self { value: 0x0010 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Read-only handle to a target process
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
    access: ProcessAccess,
}

impl ProcessHandle {
    /// Open a process with specified access rights
    pub fn open(pid: ProcessId, access: ProcessAccess) -> RadarResult<Self> {
        let raw_handle = kernel32::open_process(pid, access.value())?;
        Ok(ProcessHandle {
            handle: Handle::new(raw_handle),
            pid,
            access,
        })
    }

    /// Open a process for reading memory and enumerating modules
    pub fn open_for_read(pid: ProcessId) -> RadarResult<Self> {
        Self::open(
            pid,
            ProcessAccess::combine(&[ProcessAccess::QUERY_INFORMATION, ProcessAccess::VM_READ]),
        )
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid as long as this ProcessHandle exists
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Get the access rights
    pub fn access(&self) -> ProcessAccess {
        self.access
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    /// Fill `buffer` from the process's memory at `address`
    pub fn read_memory(&self, address: Address, buffer: &mut [u8]) -> RadarResult<()> {
        if !self.is_valid() {
            return Err(RadarError::InvalidHandle(
                "Process handle is null".to_string(),
            ));
        }
        unsafe { kernel32::read_process_memory(self.handle.raw(), address.as_usize(), buffer)? };
        Ok(())
    }

    /// Whether the process is still running
    pub fn is_running(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        unsafe { kernel32::is_process_running(self.handle.raw()).unwrap_or(false) }
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .field("access", &format!("0x{:X}", self.access.value()))
            .finish()
    }
}
