//! Entity and player record value types

use super::{Address, Team};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A live entity as read from memory, before classification.
///
/// Either every field was read successfully or the value does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub address: Address,
    pub position: Vec3,
    pub health: i32,
    pub team: Team,
}

impl EntityState {
    /// Horizontal distance to a world-space point, ignoring height
    pub fn distance_2d(&self, x: f32, y: f32) -> f32 {
        let dx = self.position.x - x;
        let dy = self.position.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A point in display space, `(0, 0)` at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: u32,
    pub y: u32,
}

impl DisplayPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        DisplayPoint { x, y }
    }
}

/// A classified and projected player, ready for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub address: Address,
    pub position: Vec3,
    pub health: i32,
    pub team: Team,
    pub is_enemy: bool,
    pub display_position: DisplayPoint,
}

impl PlayerRecord {
    /// Horizontal distance to a world-space point
    pub fn distance_2d(&self, x: f32, y: f32) -> f32 {
        let dx = self.position.x - x;
        let dy = self.position.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Player tallies shown next to the radar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamCounts {
    pub enemies: usize,
    pub teammates: usize,
    pub total: usize,
}

impl TeamCounts {
    pub fn from_players(players: &[PlayerRecord]) -> Self {
        let enemies = players.iter().filter(|p| p.is_enemy).count();
        TeamCounts {
            enemies,
            teammates: players.len() - enemies,
            total: players.len(),
        }
    }
}
