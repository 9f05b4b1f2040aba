//! Per-tick entity snapshot
//!
//! Reads the local player and every populated entity-list slot through the
//! memory accessor. Nothing is cached between ticks.

use crate::core::types::{Address, EntityState, RadarError, RadarResult, Team};
use crate::game::offsets::{OffsetTable, LIFE_STATE_ALIVE};
use crate::memory::{MemoryAccessor, ModuleSlot, ReadMemory};
use crate::process::ProcessBackend;
use tracing::{debug, trace};

/// Health values above this are treated as garbage reads
pub const MAX_PLAUSIBLE_HEALTH: i32 = 1000;

/// Entities read during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Living entities in entity-list order
    pub entities: Vec<EntityState>,
    /// The locally controlled entity, alive or not
    pub local_player: Option<EntityState>,
    /// `None` when the local player is missing or has no team yet
    pub local_team: Option<Team>,
}

struct SlotScan {
    addresses: Vec<Address>,
    failed: usize,
}

/// Reads entities through an attached [`MemoryAccessor`]
pub struct SnapshotBuilder<'a, B: ProcessBackend> {
    accessor: &'a MemoryAccessor<B>,
    offsets: &'a OffsetTable,
}

impl<'a, B: ProcessBackend> SnapshotBuilder<'a, B> {
    pub fn new(accessor: &'a MemoryAccessor<B>, offsets: &'a OffsetTable) -> Self {
        SnapshotBuilder { accessor, offsets }
    }

    /// Address of the local player's pawn; `None` in menus or on a failed read
    pub fn resolve_local_player(&self) -> Option<Address> {
        self.local_player_pointer().ok().flatten()
    }

    fn local_player_pointer(&self) -> RadarResult<Option<Address>> {
        let slot = self
            .accessor
            .module_address(ModuleSlot::Primary, self.offsets.local_player_pawn)?;
        self.accessor.read_pointer(slot)
    }

    /// Non-null entity-list slots in stored order
    pub fn list_entity_addresses(&self) -> Vec<Address> {
        self.scan_entity_list()
            .map(|scan| scan.addresses)
            .unwrap_or_default()
    }

    fn scan_entity_list(&self) -> RadarResult<SlotScan> {
        let base = self
            .accessor
            .module_address(ModuleSlot::Primary, self.offsets.entity_list)?;

        let mut scan = SlotScan {
            addresses: Vec::with_capacity(self.offsets.entity_list_capacity),
            failed: 0,
        };
        for index in 0..self.offsets.entity_list_capacity {
            let pointer = base
                .slot(index, self.offsets.entity_list_stride)
                .and_then(|slot| self.accessor.read_pointer(slot));
            match pointer {
                Ok(Some(address)) => scan.addresses.push(address),
                Ok(None) => {}
                Err(e) => {
                    trace!("Entity slot {} unreadable: {}", index, e);
                    scan.failed += 1;
                }
            }
        }
        Ok(scan)
    }

    /// A living entity at `address`, or `None` if it is dead or unreadable
    pub fn build_record(&self, address: Address) -> Option<EntityState> {
        self.read_living(address).unwrap_or_else(|e| {
            trace!("Dropping entity at {}: {}", address, e);
            None
        })
    }

    fn read_living(&self, address: Address) -> RadarResult<Option<EntityState>> {
        let life_state = self
            .accessor
            .read_u8(address.field(self.offsets.life_state)?)?;
        if life_state != LIFE_STATE_ALIVE {
            trace!("Entity at {} is dead (life state {})", address, life_state);
            return Ok(None);
        }

        let entity = self.read_entity(address)?;
        if entity.health <= 0 {
            trace!("Entity at {} has no health ({})", address, entity.health);
            return Ok(None);
        }
        Ok(Some(entity))
    }

    /// Read every field of the entity at `address` without a liveness check
    pub fn read_entity(&self, address: Address) -> RadarResult<EntityState> {
        let health = self.accessor.read_i32(address.field(self.offsets.health)?)?;
        if health > MAX_PLAUSIBLE_HEALTH {
            return Err(RadarError::read_failed(
                address,
                format!("implausible health {}", health),
            ));
        }

        let team = self.accessor.read_u8(address.field(self.offsets.team)?)?;
        if !Team::is_plausible(team) {
            return Err(RadarError::read_failed(
                address,
                format!("implausible team {}", team),
            ));
        }

        let position = self.accessor.read_vec3(address.field(self.offsets.origin)?)?;
        if !position.is_finite() {
            return Err(RadarError::read_failed(address, "non-finite position"));
        }

        Ok(EntityState {
            address,
            position,
            health,
            team: Team(team),
        })
    }

    /// Read the local player and every living entity.
    ///
    /// Fails only when the attachment itself is gone; single unreadable
    /// entities are left out. Any failed read is followed by a liveness
    /// check, so a process that exits mid-scan never yields a partial
    /// snapshot.
    pub fn snapshot(&self) -> RadarResult<Snapshot> {
        let mut faults = 0;

        let local_pointer = match self.local_player_pointer() {
            Ok(pointer) => pointer,
            Err(e) if e.is_connection_lost() => return Err(e),
            Err(e) => {
                debug!("Local player pointer unreadable: {}", e);
                faults += 1;
                None
            }
        };

        let scan = self.scan_entity_list()?;
        faults += scan.failed;

        let mut local_player = None;
        if let Some(address) = local_pointer {
            match self.read_entity(address) {
                Ok(entity) => local_player = Some(entity),
                Err(e) => {
                    debug!("Local player at {} unreadable: {}", address, e);
                    faults += 1;
                }
            }
        }

        let mut entities = Vec::with_capacity(scan.addresses.len());
        for address in scan.addresses {
            match self.read_living(address) {
                Ok(Some(entity)) => entities.push(entity),
                Ok(None) => {}
                Err(e) => {
                    trace!("Dropping entity at {}: {}", address, e);
                    faults += 1;
                }
            }
        }

        if faults > 0 {
            self.accessor.check_alive()?;
        }

        let local_team = local_player.map(|p| p.team).filter(Team::is_assigned);

        Ok(Snapshot {
            entities,
            local_player,
            local_team,
        })
    }
}
