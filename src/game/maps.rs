//! World-space bounds of the supported maps

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Map used when the selected name is not in the registry
pub const DEFAULT_MAP: &str = "de_dust2";

/// Axis-aligned playable area of one map, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl MapBounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        MapBounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Position of a world point inside the bounds, `(0, 0)` at `(x_min, y_min)`.
    ///
    /// Unclamped: points outside the map land outside `[0, 1]`.
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x_min) / self.width(), (y - self.y_min) / self.height())
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

lazy_static! {
    static ref MAP_BOUNDS: HashMap<&'static str, MapBounds> = {
        let mut maps = HashMap::new();
        maps.insert("de_dust2", MapBounds::new(-2476.0, 1800.0, -2032.0, 3239.0));
        maps.insert("de_mirage", MapBounds::new(-3217.0, 1912.0, -3401.0, 1682.0));
        maps.insert("de_inferno", MapBounds::new(-2087.0, 3870.0, -3870.0, 1344.0));
        maps.insert("de_cache", MapBounds::new(-2000.0, 3250.0, -2700.0, 1100.0));
        maps
    };
}

/// Bounds for `map_name` (case-insensitive), or the default map's bounds
pub fn bounds_for(map_name: &str) -> MapBounds {
    lookup(map_name).unwrap_or_else(|| MAP_BOUNDS[DEFAULT_MAP])
}

fn lookup(map_name: &str) -> Option<MapBounds> {
    MAP_BOUNDS
        .get(map_name.to_ascii_lowercase().as_str())
        .copied()
}

pub fn is_known_map(map_name: &str) -> bool {
    lookup(map_name).is_some()
}

/// Registered map names, sorted
pub fn known_maps() -> Vec<&'static str> {
    let mut names: Vec<_> = MAP_BOUNDS.keys().copied().collect();
    names.sort_unstable();
    names
}
