//! Friend/foe classification and world-to-display projection

use crate::core::types::{DisplayPoint, EntityState, PlayerRecord, Team, TeamCounts};
use crate::game::entity::Snapshot;
use crate::game::maps::{self, MapBounds};
use serde::Serialize;

/// Whether an entity on `team` is hostile to the local player.
///
/// Everyone counts as hostile while the local team is unknown.
pub fn classify(team: Team, local_team: Option<Team>) -> bool {
    match local_team {
        None => true,
        Some(local) => team != local && team.is_assigned(),
    }
}

/// Project a world point onto a `display_size` square for `map_name`.
///
/// Unknown maps use the default map's bounds.
pub fn project(world_x: f32, world_y: f32, map_name: &str, display_size: u32) -> DisplayPoint {
    project_with(&maps::bounds_for(map_name), world_x, world_y, display_size)
}

/// Project with explicit bounds. Y is flipped so north is up.
///
/// The result is always inside `[0, display_size - 1]`; non-finite input is
/// pinned to the edge rather than rejected.
pub fn project_with(
    bounds: &MapBounds,
    world_x: f32,
    world_y: f32,
    display_size: u32,
) -> DisplayPoint {
    let (nx, ny) = bounds.normalize(f64::from(world_x), f64::from(world_y));
    let size = f64::from(display_size);
    DisplayPoint::new(
        to_display(nx * size, display_size),
        to_display((1.0 - ny) * size, display_size),
    )
}

fn to_display(value: f64, display_size: u32) -> u32 {
    let max = f64::from(display_size.saturating_sub(1));
    // NaN fails both comparisons in clamp; map it to the low edge first
    let value = if value.is_nan() { 0.0 } else { value.trunc() };
    value.clamp(0.0, max) as u32
}

/// Everything the renderer needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarFrame {
    pub tick: u64,
    pub connected: bool,
    pub map_name: String,
    pub display_size: u32,
    pub players: Vec<PlayerRecord>,
    pub local_player: Option<PlayerRecord>,
    pub counts: TeamCounts,
}

impl RadarFrame {
    /// Frame published while no process is attached
    pub fn disconnected(tick: u64, map_name: impl Into<String>, display_size: u32) -> Self {
        RadarFrame {
            tick,
            connected: false,
            map_name: map_name.into(),
            display_size,
            players: Vec::new(),
            local_player: None,
            counts: TeamCounts::default(),
        }
    }

    pub fn enemies(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| p.is_enemy)
    }

    pub fn teammates(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| !p.is_enemy)
    }

    /// Nearest hostile player to a world point, with its 2-D distance
    pub fn closest_enemy(&self, x: f32, y: f32) -> Option<(&PlayerRecord, f32)> {
        self.enemies()
            .map(|p| (p, p.distance_2d(x, y)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Turns snapshots into frames for a fixed display size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    display_size: u32,
}

impl Classifier {
    pub fn new(display_size: u32) -> Self {
        Classifier { display_size }
    }

    pub fn display_size(&self) -> u32 {
        self.display_size
    }

    fn record(
        &self,
        entity: &EntityState,
        bounds: &MapBounds,
        local_team: Option<Team>,
    ) -> PlayerRecord {
        PlayerRecord {
            address: entity.address,
            position: entity.position,
            health: entity.health,
            team: entity.team,
            is_enemy: classify(entity.team, local_team),
            display_position: project_with(
                bounds,
                entity.position.x,
                entity.position.y,
                self.display_size,
            ),
        }
    }

    pub fn assemble(&self, snapshot: &Snapshot, map_name: &str, tick: u64) -> RadarFrame {
        let bounds = maps::bounds_for(map_name);
        let players: Vec<PlayerRecord> = snapshot
            .entities
            .iter()
            .map(|e| self.record(e, &bounds, snapshot.local_team))
            .collect();
        let local_player = snapshot.local_player.as_ref().map(|local| PlayerRecord {
            is_enemy: false,
            ..self.record(local, &bounds, snapshot.local_team)
        });

        RadarFrame {
            tick,
            connected: true,
            map_name: map_name.to_string(),
            display_size: self.display_size,
            counts: TeamCounts::from_players(&players),
            players,
            local_player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Address;
    use glam::Vec3;
    use pretty_assertions::assert_eq;

    fn entity(slot: usize, team: Team, x: f32, y: f32) -> EntityState {
        EntityState {
            address: Address::new(0x1000 + slot * 0x100),
            position: Vec3::new(x, y, 0.0),
            health: 100,
            team,
        }
    }

    #[test]
    fn test_classify_scenarios() {
        assert!(classify(Team::COUNTER_TERRORIST, Some(Team::TERRORIST)));
        assert!(!classify(Team::TERRORIST, Some(Team::TERRORIST)));
        assert!(classify(Team::TERRORIST, None));
        assert!(classify(Team::UNASSIGNED, None));
        assert!(!classify(Team::UNASSIGNED, Some(Team::TERRORIST)));
    }

    #[test]
    fn test_project_corners() {
        let b = maps::bounds_for("de_dust2");
        assert_eq!(
            project(b.x_min as f32, b.y_min as f32, "de_dust2", 400),
            DisplayPoint::new(0, 399)
        );
        assert_eq!(
            project(b.x_max as f32, b.y_max as f32, "de_dust2", 400),
            DisplayPoint::new(399, 0)
        );
    }

    #[test]
    fn test_project_unknown_map_uses_default() {
        assert_eq!(
            project(0.0, 0.0, "de_nuke", 400),
            project(0.0, 0.0, maps::DEFAULT_MAP, 400)
        );
    }

    #[test]
    fn test_project_non_finite() {
        let p = project(f32::NAN, f32::INFINITY, "de_dust2", 400);
        assert_eq!(p, DisplayPoint::new(0, 0));

        let p = project(f32::NEG_INFINITY, f32::NEG_INFINITY, "de_dust2", 400);
        assert_eq!(p, DisplayPoint::new(0, 399));
    }

    #[test]
    fn test_assemble() {
        let snapshot = Snapshot {
            entities: vec![
                entity(0, Team::TERRORIST, 0.0, 0.0),
                entity(1, Team::COUNTER_TERRORIST, 500.0, 500.0),
                entity(2, Team::COUNTER_TERRORIST, 100.0, 100.0),
            ],
            local_player: Some(entity(0, Team::TERRORIST, 0.0, 0.0)),
            local_team: Some(Team::TERRORIST),
        };

        let frame = Classifier::new(400).assemble(&snapshot, "de_mirage", 7);
        assert!(frame.connected);
        assert_eq!(frame.tick, 7);
        assert_eq!(frame.map_name, "de_mirage");
        assert_eq!(
            frame.counts,
            TeamCounts {
                enemies: 2,
                teammates: 1,
                total: 3
            }
        );
        assert_eq!(frame.teammates().count(), 1);
        assert!(!frame.local_player.unwrap().is_enemy);

        let (closest, distance) = frame.closest_enemy(0.0, 0.0).unwrap();
        assert_eq!(closest.address, Address::new(0x1200));
        assert!((distance - 141.42136).abs() < 1e-3);
    }

    #[test]
    fn test_disconnected_frame() {
        let frame = RadarFrame::disconnected(3, "de_dust2", 400);
        assert!(!frame.connected);
        assert!(frame.players.is_empty());
        assert_eq!(frame.counts, TeamCounts::default());
        assert!(frame.closest_enemy(0.0, 0.0).is_none());
    }
}
