//! Error taxonomy for attaching to and reading from the target process

use std::fmt;
use thiserror::Error;

/// Main error type for radar operations
#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: u32, reason: String },

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFault { address: String, reason: String },

    #[error("Process {0} has exited")]
    StaleHandle(u32),

    #[error("Not attached to a process")]
    NotAttached,

    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Windows API: {0}")]
    WindowsApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for radar operations
pub type RadarResult<T> = Result<T, RadarError>;

impl RadarError {
    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        RadarError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a read fault error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        RadarError::ReadFault {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors that concern the whole attachment rather than one field.
    ///
    /// The polling loop turns these into state transitions; everything else
    /// is absorbed where it happens.
    pub fn is_process_level(&self) -> bool {
        matches!(
            self,
            RadarError::ProcessNotFound(_)
                | RadarError::ModuleNotFound(_)
                | RadarError::AccessDenied { .. }
                | RadarError::StaleHandle(_)
                | RadarError::NotAttached
        )
    }

    /// True when the attached session can no longer be used
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, RadarError::StaleHandle(_) | RadarError::NotAttached)
    }
}
