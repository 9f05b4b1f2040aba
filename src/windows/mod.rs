//! Windows API layer for process access
//!
//! Thin wrappers around the Win32 calls the radar needs: opening a process
//! for reading, copying its memory, and checking whether it is still alive.
//! All unsafe FFI calls are contained within this module.

pub mod bindings;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::Handle;
pub use utils::{ErrorCode, WinError};

// Re-export key bindings
pub use bindings::kernel32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_reexport() {
        assert_eq!(ErrorCode::from(5), ErrorCode::AccessDenied);
    }
}
