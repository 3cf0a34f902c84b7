// Data-driven game configuration.
//
// All tunable parameters live in `GameConfig`, loaded from JSON at startup
// and fixed for the session. The core never uses magic numbers; it reads
// from the config. Every field has a default (`#[serde(default)]`), so a
// config file only needs to list what it overrides.
//
// `GameConfig::from_json()` parses and validates in one step. Code that
// builds a config by hand should call `validate()` (or go through
// `GameCore::with_config()`, which does).
//
// See also: `game.rs` which owns the `GameConfig` as part of `GameCore`,
// `procgen.rs` for how `spawn_probability` is used, `proximity.rs` for
// `nearby_radius`, `geo.rs` for the `GeoFrame` map anchor.

use crate::error::ConfigError;
use crate::geo::GeoFrame;
use crate::types::{CellCoord, CellValue};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The cell the player stands on. Fixed for the session.
    pub player_origin: CellCoord,
    /// Probability that a cell spawns a token at all (0.0–1.0).
    pub spawn_probability: f64,
    /// Maximum Manhattan distance from the player for a cell to be clickable.
    pub nearby_radius: u32,
    /// A merge producing a value at or above this wins the game.
    pub win_threshold: CellValue,
    /// Half-width of the square of cells shown around the player.
    pub neighborhood_radius: u32,
    /// Where the grid sits on the map.
    pub geo: GeoFrame,
}

impl GameConfig {
    /// Largest accepted `neighborhood_radius`. Renderers walk the whole
    /// (2r + 1)² square on every redraw.
    pub const MAX_NEIGHBORHOOD_RADIUS: u32 = 1024;

    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            // Also rejects NaN.
            return Err(ConfigError::SpawnProbability(self.spawn_probability));
        }
        if self.win_threshold < 2 {
            return Err(ConfigError::WinThreshold(self.win_threshold));
        }
        if self.neighborhood_radius > Self::MAX_NEIGHBORHOOD_RADIUS {
            return Err(ConfigError::NeighborhoodRadius {
                got: self.neighborhood_radius,
                max: Self::MAX_NEIGHBORHOOD_RADIUS,
            });
        }
        if !self.geo.tile_degrees.is_finite() || self.geo.tile_degrees <= 0.0 {
            return Err(ConfigError::TileDegrees(self.geo.tile_degrees));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_origin: CellCoord::ORIGIN,
            spawn_probability: 0.35,
            nearby_radius: 3,
            win_threshold: 16,
            neighborhood_radius: 8,
            geo: GeoFrame::default(),
        }
    }
}
