//! Attachment to the target process and bounds-checked reads from it

use crate::config::TargetConfig;
use crate::core::types::{Address, ModuleInfo, Offset, ProcessInfo, RadarError, RadarResult};
use crate::memory::reader::ReadMemory;
use crate::process::{ProcessBackend, ProcessMemory};
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Where the accessor is in its attach/detach cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Attaching,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Attaching => write!(f, "attaching"),
            ConnectionState::Connected => write!(f, "connected"),
        }
    }
}

/// Which of the two configured modules an offset is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSlot {
    Primary,
    Secondary,
}

/// A module resolved during attach. Valid until the next detach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    info: ModuleInfo,
}

impl ModuleHandle {
    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn base(&self) -> Address {
        self.info.base_address
    }

    pub fn size(&self) -> usize {
        self.info.size
    }
}

impl From<ModuleInfo> for ModuleHandle {
    fn from(info: ModuleInfo) -> Self {
        ModuleHandle { info }
    }
}

struct Session<P> {
    process: P,
    info: ProcessInfo,
    primary: ModuleHandle,
    secondary: Option<ModuleHandle>,
}

/// Owns the connection to the target and every read made through it.
///
/// Only [`attach`](Self::attach) and [`detach`](Self::detach) change the
/// connection state.
pub struct MemoryAccessor<B: ProcessBackend> {
    backend: B,
    target: TargetConfig,
    session: Option<Session<B::Process>>,
    state: ConnectionState,
}

impl<B: ProcessBackend> MemoryAccessor<B> {
    pub fn new(backend: B, target: TargetConfig) -> Self {
        MemoryAccessor {
            backend,
            target,
            session: None,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn target(&self) -> &TargetConfig {
        &self.target
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The attached process, if any
    pub fn process(&self) -> Option<&ProcessInfo> {
        self.session.as_ref().map(|s| &s.info)
    }

    /// Find the target, open it and resolve its modules.
    ///
    /// No-op while connected. On failure the accessor is left disconnected
    /// and the error names the stage that failed.
    pub fn attach(&mut self) -> RadarResult<()> {
        if self.is_connected() {
            return Ok(());
        }

        self.state = ConnectionState::Attaching;
        match self.open_session() {
            Ok(session) => {
                info!(
                    "Attached to {} (PID {}), {} at {}",
                    session.info.name,
                    session.info.pid,
                    session.primary.name(),
                    session.primary.base()
                );
                self.session = Some(session);
                self.state = ConnectionState::Connected;
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e)
            }
        }
    }

    fn open_session(&self) -> RadarResult<Session<B::Process>> {
        let info = self.backend.find_process(&self.target.process_name)?;
        debug!("Found {} with PID {}", info.name, info.pid);

        let process = self.backend.open(&info)?;
        let primary = process
            .find_module(&self.target.primary_module)
            .map_err(|e| module_unavailable(&self.target.primary_module, e))?
            .into();

        let secondary = match &self.target.secondary_module {
            Some(name) => match process.find_module(name) {
                Ok(module) => Some(module.into()),
                Err(e) => {
                    warn!("Optional module {} unavailable: {}", name, e);
                    None
                }
            },
            None => None,
        };

        Ok(Session {
            process,
            info,
            primary,
            secondary,
        })
    }

    /// Drop the handle and module bases. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Detached from {} (PID {})", session.info.name, session.info.pid);
        }
        self.state = ConnectionState::Disconnected;
    }

    pub fn primary_module(&self) -> Option<&ModuleHandle> {
        self.session.as_ref().map(|s| &s.primary)
    }

    pub fn secondary_module(&self) -> Option<&ModuleHandle> {
        self.session.as_ref().and_then(|s| s.secondary.as_ref())
    }

    /// Absolute address of `offset` inside one of the attached modules
    pub fn module_address(&self, slot: ModuleSlot, offset: Offset) -> RadarResult<Address> {
        let session = self.session.as_ref().ok_or(RadarError::NotAttached)?;
        let module = match slot {
            ModuleSlot::Primary => &session.primary,
            ModuleSlot::Secondary => session.secondary.as_ref().ok_or_else(|| {
                RadarError::ModuleNotFound(
                    self.target
                        .secondary_module
                        .clone()
                        .unwrap_or_else(|| "secondary module".to_string()),
                )
            })?,
        };
        module.base().field(offset)
    }

    /// `StaleHandle` once the attached process has exited
    pub fn check_alive(&self) -> RadarResult<()> {
        let session = self.session.as_ref().ok_or(RadarError::NotAttached)?;
        if session.process.is_running() {
            Ok(())
        } else {
            Err(RadarError::StaleHandle(session.info.pid))
        }
    }
}

/// A module list that cannot be read yet, as while the target is still
/// starting, reports the module as not found.
fn module_unavailable(name: &str, err: RadarError) -> RadarError {
    match err {
        RadarError::ModuleNotFound(_)
        | RadarError::StaleHandle(_)
        | RadarError::AccessDenied { .. } => err,
        other => {
            debug!("Module list unavailable while looking for {}: {}", name, other);
            RadarError::ModuleNotFound(name.to_string())
        }
    }
}

impl<B: ProcessBackend> ReadMemory for MemoryAccessor<B> {
    fn read_exact(&self, address: Address, buffer: &mut [u8]) -> RadarResult<()> {
        let session = self.session.as_ref().ok_or(RadarError::NotAttached)?;
        session.process.read_memory(address, buffer)?;
        trace!(%address, bytes = %hex::encode(&*buffer), "read");
        Ok(())
    }
}

impl<B: ProcessBackend> fmt::Debug for MemoryAccessor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryAccessor")
            .field("target", &self.target.process_name)
            .field("state", &self.state)
            .field("process", &self.process())
            .finish()
    }
}
