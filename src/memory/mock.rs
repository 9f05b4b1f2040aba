//! In-memory process backend
//!
//! Stands in for the operating system in tests, benchmarks and on hosts
//! without a native backend. A single simulated process can be launched,
//! populated, and terminated while an accessor holds a handle to it.

use crate::core::types::{Address, ModuleInfo, ProcessId, ProcessInfo, RadarError, RadarResult};
use crate::process::{ProcessBackend, ProcessMemory};
use glam::Vec3;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockWorld {
    process: Option<ProcessInfo>,
    running: bool,
    /// Bumped on every launch so handles to an earlier instance go stale
    generation: u64,
    modules: Vec<ModuleInfo>,
    memory: HashMap<usize, u8>,
    access_denied: bool,
    modules_unavailable: bool,
    pending_panics: usize,
    /// Reads left before the process exits on its own
    reads_until_exit: Option<usize>,
    find_calls: usize,
}

/// Shared, cloneable handle to a simulated process table
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    world: Arc<Mutex<MockWorld>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn world(&self) -> MutexGuard<'_, MockWorld> {
        self.world.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a fresh process, discarding any previous one and its memory
    pub fn launch(&self, pid: ProcessId, name: &str) {
        let mut world = self.world();
        world.process = Some(ProcessInfo::new(pid, name));
        world.running = true;
        world.generation += 1;
        world.modules.clear();
        world.memory.clear();
        world.reads_until_exit = None;
    }

    /// Mark the process as exited; open handles report it on the next check
    pub fn terminate(&self) {
        self.world().running = false;
    }

    pub fn load_module(&self, name: &str, base: Address, size: usize) {
        self.world().modules.push(ModuleInfo::new(name, base, size));
    }

    pub fn set_access_denied(&self, denied: bool) {
        self.world().access_denied = denied;
    }

    /// Module lookups fail the way a half-started process does
    pub fn set_module_list_unavailable(&self, unavailable: bool) {
        self.world().modules_unavailable = unavailable;
    }

    /// The next read panics inside the backend
    pub fn inject_panic(&self) {
        self.world().pending_panics += 1;
    }

    /// Let `reads` more reads succeed, then exit the process on the next one
    pub fn terminate_after_reads(&self, reads: usize) {
        self.world().reads_until_exit = Some(reads);
    }

    /// How many process lookups have been made
    pub fn find_calls(&self) -> usize {
        self.world().find_calls
    }

    pub fn write_bytes(&self, address: Address, bytes: &[u8]) {
        let mut world = self.world();
        for (i, &byte) in bytes.iter().enumerate() {
            world.memory.insert(address.as_usize() + i, byte);
        }
    }

    /// Unmap a range so reads from it fault
    pub fn clear_bytes(&self, address: Address, length: usize) {
        let mut world = self.world();
        for i in 0..length {
            world.memory.remove(&(address.as_usize() + i));
        }
    }

    pub fn write_u8(&self, address: Address, value: u8) {
        self.write_bytes(address, &[value]);
    }

    pub fn write_i32(&self, address: Address, value: i32) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write_u64(&self, address: Address, value: u64) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write_f32(&self, address: Address, value: f32) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write_pointer(&self, address: Address, target: Address) {
        self.write_u64(address, target.as_usize() as u64);
    }

    pub fn write_vec3(&self, address: Address, value: Vec3) {
        let mut bytes = [0u8; 12];
        for (chunk, component) in bytes.chunks_exact_mut(4).zip(value.to_array()) {
            chunk.copy_from_slice(&component.to_le_bytes());
        }
        self.write_bytes(address, &bytes);
    }
}

impl ProcessBackend for MockBackend {
    type Process = MockProcess;

    fn find_process(&self, name: &str) -> RadarResult<ProcessInfo> {
        let mut world = self.world();
        world.find_calls += 1;
        match &world.process {
            Some(info) if world.running && info.name_matches(name) => Ok(info.clone()),
            _ => Err(RadarError::ProcessNotFound(name.to_string())),
        }
    }

    fn open(&self, process: &ProcessInfo) -> RadarResult<MockProcess> {
        let world = self.world();
        if world.access_denied {
            return Err(RadarError::access_denied(
                process.pid,
                "simulated OpenProcess refusal",
            ));
        }
        match &world.process {
            Some(info) if world.running && info.pid == process.pid => Ok(MockProcess {
                world: Arc::clone(&self.world),
                pid: process.pid,
                generation: world.generation,
            }),
            _ => Err(RadarError::ProcessNotFound(format!("PID {}", process.pid))),
        }
    }
}

/// Handle to the simulated process
#[derive(Debug)]
pub struct MockProcess {
    world: Arc<Mutex<MockWorld>>,
    pid: ProcessId,
    generation: u64,
}

impl MockProcess {
    fn world(&self) -> MutexGuard<'_, MockWorld> {
        self.world.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_current(&self, world: &MockWorld) -> bool {
        world.running && world.generation == self.generation
    }
}

impl ProcessMemory for MockProcess {
    fn pid(&self) -> ProcessId {
        self.pid
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> RadarResult<()> {
        let mut world = self.world();
        if world.pending_panics > 0 {
            world.pending_panics -= 1;
            drop(world);
            panic!("simulated fault while reading {}", address);
        }

        match world.reads_until_exit {
            Some(0) => {
                world.running = false;
                world.reads_until_exit = None;
            }
            Some(left) => world.reads_until_exit = Some(left - 1),
            None => {}
        }

        if !self.is_current(&world) {
            return Err(RadarError::read_failed(address, "process has exited"));
        }

        for (i, slot) in buffer.iter_mut().enumerate() {
            let byte = address
                .as_usize()
                .checked_add(i)
                .and_then(|a| world.memory.get(&a));
            *slot = *byte.ok_or_else(|| RadarError::read_failed(address, "unmapped memory"))?;
        }
        Ok(())
    }

    fn find_module(&self, name: &str) -> RadarResult<ModuleInfo> {
        let world = self.world();
        if !self.is_current(&world) {
            return Err(RadarError::StaleHandle(self.pid));
        }
        if world.modules_unavailable {
            return Err(RadarError::WindowsApi(
                "EnumProcessModules: Partial copy".to_string(),
            ));
        }
        world
            .modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| RadarError::ModuleNotFound(name.to_string()))
    }

    fn is_running(&self) -> bool {
        self.is_current(&self.world())
    }
}
