//! A simulated game client laid out with [`OffsetTable::CURRENT`]
//!
//! Wraps [`MockBackend`] with helpers that place player entities where the
//! snapshot builder expects to find them.

use crate::core::types::{Address, ProcessId, Team};
use crate::game::offsets::{OffsetTable, LIFE_STATE_ALIVE};
use crate::memory::mock::MockBackend;
use glam::Vec3;

pub const CLIENT_BASE: Address = Address::new(0x7FF6_1000_0000);
pub const SERVER_BASE: Address = Address::new(0x7FF6_9000_0000);

const CLIENT_SIZE: usize = 0x200_0000;
const SERVER_SIZE: usize = 0x100_0000;
const ENTITY_REGION: usize = 0x0250_0000_0000;
const ENTITY_SPACING: usize = 0x4000;

/// Fields written for one simulated player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSpec {
    pub team: Team,
    pub health: i32,
    pub life_state: u8,
    pub position: Vec3,
}

impl PlayerSpec {
    /// A living player with full health at `(x, y)`
    pub fn new(team: Team, x: f32, y: f32) -> Self {
        PlayerSpec {
            team,
            health: 100,
            life_state: LIFE_STATE_ALIVE,
            position: Vec3::new(x, y, 0.0),
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn dead(mut self) -> Self {
        self.life_state = 1;
        self.health = 0;
        self
    }
}

/// Simulated `cs2.exe` with `client.dll` and `server.dll` loaded
#[derive(Debug, Clone, Default)]
pub struct MockGame {
    backend: MockBackend,
    offsets: OffsetTable,
}

impl MockGame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend handle to give to a `MemoryAccessor`
    pub fn backend(&self) -> MockBackend {
        self.backend.clone()
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Start the process with both modules and an empty entity list
    pub fn launch(&self, pid: ProcessId) {
        self.launch_process(pid);
        self.backend.load_module("server.dll", SERVER_BASE, SERVER_SIZE);
    }

    /// Start the process without the optional module
    pub fn launch_without_secondary(&self, pid: ProcessId) {
        self.launch_process(pid);
    }

    fn launch_process(&self, pid: ProcessId) {
        self.backend.launch(pid, "cs2.exe");
        self.backend.load_module("client.dll", CLIENT_BASE, CLIENT_SIZE);
        for slot in 0..self.offsets.entity_list_capacity {
            self.clear_slot(slot);
        }
        self.set_local_player(None);
    }

    pub fn terminate(&self) {
        self.backend.terminate();
    }

    /// Address used for the entity stored in `slot`
    pub fn entity_address(&self, slot: usize) -> Address {
        Address::new(ENTITY_REGION + slot * ENTITY_SPACING)
    }

    fn slot_address(&self, slot: usize) -> Address {
        let offset = self.offsets.entity_list + slot * self.offsets.entity_list_stride;
        Address::new(CLIENT_BASE.as_usize() + offset)
    }

    fn field(address: Address, offset: usize) -> Address {
        Address::new(address.as_usize() + offset)
    }

    /// Write a player into `slot` and point the slot at it
    pub fn spawn(&self, slot: usize, spec: PlayerSpec) -> Address {
        let address = self.entity_address(slot);
        self.write_player(address, spec);
        self.backend.write_pointer(self.slot_address(slot), address);
        address
    }

    /// Write player fields without linking them into the entity list
    pub fn write_player(&self, address: Address, spec: PlayerSpec) {
        self.set_health(address, spec.health);
        self.set_team(address, spec.team.0);
        self.set_life_state(address, spec.life_state);
        self.move_to(address, spec.position);
    }

    pub fn clear_slot(&self, slot: usize) {
        self.backend.write_pointer(self.slot_address(slot), Address::null());
    }

    /// Make a slot unreadable
    pub fn unmap_slot(&self, slot: usize) {
        self.backend.clear_bytes(self.slot_address(slot), 8);
    }

    pub fn set_local_player(&self, address: Option<Address>) {
        let slot = Address::new(CLIENT_BASE.as_usize() + self.offsets.local_player_pawn);
        self.backend
            .write_pointer(slot, address.unwrap_or_else(Address::null));
    }

    pub fn set_health(&self, address: Address, health: i32) {
        self.backend
            .write_i32(Self::field(address, self.offsets.health), health);
    }

    pub fn set_team(&self, address: Address, team: u8) {
        self.backend.write_u8(Self::field(address, self.offsets.team), team);
    }

    pub fn set_life_state(&self, address: Address, life_state: u8) {
        self.backend
            .write_u8(Self::field(address, self.offsets.life_state), life_state);
    }

    pub fn move_to(&self, address: Address, position: Vec3) {
        self.backend
            .write_vec3(Self::field(address, self.offsets.origin), position);
    }

    pub fn kill(&self, address: Address) {
        self.set_life_state(address, 1);
        self.set_health(address, 0);
    }

    /// Make one field of an entity unreadable
    pub fn corrupt_origin(&self, address: Address) {
        self.backend
            .clear_bytes(Self::field(address, self.offsets.origin), 12);
    }
}
