//! Win32 implementation of the process traits

use crate::core::types::{Address, ModuleInfo, ProcessId, ProcessInfo, RadarResult};
use crate::process::{
    find_process_by_name, ModuleEnumerator, ProcessBackend, ProcessHandle, ProcessMemory,
};

/// Finds processes with ToolHelp32 and reads them with `ReadProcessMemory`
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsBackend;

impl WindowsBackend {
    pub fn new() -> Self {
        WindowsBackend
    }
}

impl ProcessBackend for WindowsBackend {
    type Process = ProcessHandle;

    fn find_process(&self, name: &str) -> RadarResult<ProcessInfo> {
        find_process_by_name(name)
    }

    fn open(&self, process: &ProcessInfo) -> RadarResult<ProcessHandle> {
        ProcessHandle::open_for_read(process.pid)
    }
}

impl ProcessMemory for ProcessHandle {
    fn pid(&self) -> ProcessId {
        ProcessHandle::pid(self)
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> RadarResult<()> {
        ProcessHandle::read_memory(self, address, buffer)
    }

    fn find_module(&self, name: &str) -> RadarResult<ModuleInfo> {
        ModuleEnumerator::new(self).find_by_name(name)
    }

    fn is_running(&self) -> bool {
        ProcessHandle::is_running(self)
    }
}
