//! Kernel32.dll bindings for process and memory operations

use crate::core::types::{RadarError, RadarResult};
use crate::windows::utils::{ErrorCode, WinError};
use winapi::shared::minwindef::{DWORD, FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::ReadProcessMemory;
use winapi::um::minwinbase::STILL_ACTIVE;
use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess
///
/// Access denial is reported separately from a vanished PID so the operator
/// can tell "not elevated" from "not running".
pub fn open_process(pid: u32, desired_access: u32) -> RadarResult<HANDLE> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if !handle.is_null() {
            return Ok(handle);
        }
    }

    match ErrorCode::last_error() {
        ErrorCode::AccessDenied => Err(RadarError::access_denied(
            pid,
            "OpenProcess refused; run with elevated privileges",
        )),
        code => Err(RadarError::ProcessNotFound(format!("PID {}: {}", pid, code))),
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> RadarResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(WinError::new("CloseHandle").into())
    } else {
        Ok(())
    }
}

/// Safe wrapper for ReadProcessMemory
///
/// Partial copies are treated as failures.
///
/// # Safety
/// The handle must be a valid process handle with `PROCESS_VM_READ`
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: usize,
    buffer: &mut [u8],
) -> RadarResult<usize> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address as LPCVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        return Err(RadarError::read_failed(
            format!("0x{:X}", address),
            format!("ReadProcessMemory failed: {}", ErrorCode::last_error()),
        ));
    }

    if bytes_read != buffer.len() {
        return Err(RadarError::read_failed(
            format!("0x{:X}", address),
            format!("partial copy ({} of {} bytes)", bytes_read, buffer.len()),
        ));
    }

    Ok(bytes_read)
}

/// Whether the process behind `handle` is still running
///
/// # Safety
/// The handle must be a valid process handle with query access
pub unsafe fn is_process_running(handle: HANDLE) -> RadarResult<bool> {
    let mut exit_code: DWORD = 0;
    if GetExitCodeProcess(handle, &mut exit_code) == FALSE {
        return Err(WinError::new("GetExitCodeProcess").into());
    }
    Ok(exit_code == STILL_ACTIVE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;
    use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_null_handle_operations() {
        unsafe {
            assert!(close_handle(ptr::null_mut()).is_ok());

            let mut buffer = vec![0u8; 4];
            assert!(read_process_memory(ptr::null_mut(), 0x1000, &mut buffer).is_err());
            assert!(is_process_running(ptr::null_mut()).is_err());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_invalid_process() {
        let result = open_process(0, PROCESS_QUERY_LIMITED_INFORMATION);
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_current_process_is_running() {
        let handle = open_process(std::process::id(), PROCESS_QUERY_LIMITED_INFORMATION)
            .expect("current process should open");
        unsafe {
            assert!(is_process_running(handle).unwrap());
            close_handle(handle).unwrap();
        }
    }
}
