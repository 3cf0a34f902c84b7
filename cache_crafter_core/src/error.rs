// Error types for configuration loading and validated grid writes.
//
// The click state machine itself has no error paths (every input partition
// maps to a defined transition). Errors only arise at the two boundaries
// where outside data enters the core: the JSON config, and
// `Grid::try_set_current_value` for externally supplied cell values.

use crate::types::{CellCoord, CellValue};

/// A config that failed to parse or failed validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spawn_probability must be in [0, 1], got {0}")]
    SpawnProbability(f64),
    #[error("win_threshold must be at least 2, got {0}")]
    WinThreshold(CellValue),
    #[error("neighborhood_radius must be at most {max}, got {got}")]
    NeighborhoodRadius { got: u32, max: u32 },
    #[error("geo.tile_degrees must be finite and positive, got {0}")]
    TileDegrees(f64),
}

/// A rejected write to the grid.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {coord} cannot hold {value}: values must be 0 or a power of two")]
    InvalidValue { coord: CellCoord, value: CellValue },
}
