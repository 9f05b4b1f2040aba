//! Process enumeration using the ToolHelp32 API

use crate::core::types::{ProcessInfo, RadarError, RadarResult};
use crate::windows::utils::{ansi_to_string, WinError};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32First, Process32Next, PROCESSENTRY32, TH32CS_SNAPPROCESS,
};
use winapi::um::winnt::HANDLE;

/// Iterates a ToolHelp32 process snapshot
pub struct ProcessEnumerator {
    snapshot: HANDLE,
    first_called: bool,
}

impl ProcessEnumerator {
    /// Take a snapshot of the running processes
    pub fn new() -> RadarResult<Self> {
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
            if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
                return Err(WinError::new("CreateToolhelp32Snapshot").into());
            }
            Ok(ProcessEnumerator {
                snapshot,
                first_called: false,
            })
        }
    }

    fn next_process(&mut self) -> Option<ProcessInfo> {
        unsafe {
            let mut entry: PROCESSENTRY32 = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32First(self.snapshot, &mut entry)
            } else {
                Process32Next(self.snapshot, &mut entry)
            };

            if success == FALSE {
                return None;
            }

            Some(ProcessInfo::new(
                entry.th32ProcessID,
                ansi_to_string(&entry.szExeFile),
            ))
        }
    }
}

impl Drop for ProcessEnumerator {
    fn drop(&mut self) {
        if !self.snapshot.is_null() && self.snapshot != INVALID_HANDLE_VALUE {
            unsafe {
                let _ = CloseHandle(self.snapshot);
            }
        }
    }
}

impl Iterator for ProcessEnumerator {
    type Item = ProcessInfo;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_process()
    }
}

/// First running process whose executable name matches (case-insensitive)
pub fn find_process_by_name(name: &str) -> RadarResult<ProcessInfo> {
    ProcessEnumerator::new()?
        .find(|p| p.name_matches(name))
        .ok_or_else(|| RadarError::ProcessNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_enumerator_sees_current_process() {
        let pid = std::process::id();
        let found = ProcessEnumerator::new().unwrap().any(|p| p.pid == pid);
        assert!(found);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_missing_process() {
        match find_process_by_name("NonExistentProcess123456.exe") {
            Err(RadarError::ProcessNotFound(name)) => {
                assert_eq!(name, "NonExistentProcess123456.exe")
            }
            other => panic!("Expected ProcessNotFound, got {:?}", other),
        }
    }
}
