//! Static offsets for one build of the game client
//!
//! Values are only valid for the build named in [`OffsetTable::CURRENT`].
//! Module-relative offsets live in [`client`]; entity field offsets in
//! [`netvars`].

use crate::core::types::Offset;

/// Offsets relative to the primary module (`client.dll`)
pub mod client {
    use super::Offset;

    pub const DW_ENTITY_LIST: Offset = 0x19B_BCC8;
    pub const DW_LOCAL_PLAYER_PAWN: Offset = 0x183_1D28;
}

/// Field offsets relative to an entity (pawn) address
pub mod netvars {
    use super::Offset;

    /// `i32`
    pub const M_I_HEALTH: Offset = 0x334;
    /// `u8`
    pub const M_LIFE_STATE: Offset = 0x348;
    /// `u8`
    pub const M_I_TEAM_NUM: Offset = 0x3E3;
    /// 3 x `f32`
    pub const M_VEC_ORIGIN: Offset = 0x1268;
}

/// Entity list layout
pub mod entity_list {
    use super::Offset;

    /// Slots read per tick
    pub const CAPACITY: usize = 64;
    /// Distance between consecutive slot pointers
    pub const STRIDE: Offset = 0x78;
}

/// Life-state value of a living entity
pub const LIFE_STATE_ALIVE: u8 = 0;

/// Everything the snapshot builder needs to locate and decode entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable {
    /// Client build these values were dumped from
    pub build: &'static str,
    pub entity_list: Offset,
    pub local_player_pawn: Offset,
    pub entity_list_capacity: usize,
    pub entity_list_stride: Offset,
    pub health: Offset,
    pub life_state: Offset,
    pub team: Offset,
    pub origin: Offset,
}

impl OffsetTable {
    pub const CURRENT: OffsetTable = OffsetTable {
        build: "client.dll/19BBCC8",
        entity_list: client::DW_ENTITY_LIST,
        local_player_pawn: client::DW_LOCAL_PLAYER_PAWN,
        entity_list_capacity: entity_list::CAPACITY,
        entity_list_stride: entity_list::STRIDE,
        health: netvars::M_I_HEALTH,
        life_state: netvars::M_LIFE_STATE,
        team: netvars::M_I_TEAM_NUM,
        origin: netvars::M_VEC_ORIGIN,
    };
}

impl Default for OffsetTable {
    fn default() -> Self {
        Self::CURRENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_table() {
        let table = OffsetTable::default();
        assert_eq!(table, OffsetTable::CURRENT);
        assert_eq!(table.entity_list, 0x19BBCC8);
        assert_eq!(table.local_player_pawn, 0x1831D28);
        assert_eq!(table.entity_list_capacity, 64);
        assert_eq!(table.entity_list_stride, 0x78);
    }

    #[test]
    fn test_entity_fields_do_not_overlap() {
        let t = OffsetTable::CURRENT;
        let mut fields = [
            (t.health, 4),
            (t.life_state, 1),
            (t.team, 1),
            (t.origin, 12),
        ];
        fields.sort();
        for pair in fields.windows(2) {
            assert!(pair[0].0 + pair[0].1 <= pair[1].0, "{:?}", pair);
        }
    }
}
