//! Windows error code handling utilities

use crate::core::types::RadarError;
use std::fmt;
use winapi::um::errhandlingapi::GetLastError;

/// Windows error codes the radar reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    PartialCopy,
    NoMoreFiles,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            18 => ErrorCode::NoMoreFiles,
            87 => ErrorCode::InvalidParameter,
            299 => ErrorCode::PartialCopy,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error of the calling thread
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(GetLastError()) }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::PartialCopy => write!(f, "Partial copy"),
            ErrorCode::NoMoreFiles => write!(f, "No more files"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// Last Windows error with the call that produced it
pub struct WinError {
    code: ErrorCode,
    context: String,
}

impl WinError {
    /// Capture the last error for `context`
    pub fn new(context: impl Into<String>) -> Self {
        WinError {
            code: ErrorCode::last_error(),
            context: context.into(),
        }
    }
}

impl From<WinError> for RadarError {
    fn from(err: WinError) -> Self {
        RadarError::WindowsApi(format!("{}: {}", err.context, err.code))
    }
}
