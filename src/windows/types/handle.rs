//! Owned HANDLE wrapper that closes on drop

use crate::windows::bindings::kernel32;
use std::ptr;
use winapi::um::winnt::HANDLE;

/// Owned Windows HANDLE, closed when dropped
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Take ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Create a null handle
    pub fn null() -> Self {
        Handle {
            handle: ptr::null_mut(),
        }
    }

    /// Check if handle is null
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

// Process handles are valid from any thread of the owning process
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        let handle = Handle::null();
        assert!(handle.is_null());
        assert_eq!(handle.raw(), ptr::null_mut());
    }
}
