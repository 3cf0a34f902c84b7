// Core types shared across the grid model.
//
// Defines the cell coordinate (`CellCoord`), the cell value type
// (`CellValue`), and the player's hand (`Hand`). All derive `Serialize` and
// `Deserialize` so the rendering collaborator can receive them in events.
//
// The coordinate plane is unbounded: nothing here clamps or validates
// coordinates. Distances are computed in 64-bit so `i32::MIN` vs `i32::MAX`
// cannot overflow.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A cell on the infinite grid. `i` is the row (north/south), `j` the column
/// (east/west).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub i: i32,
    pub j: i32,
}

impl CellCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan_distance(self, other: Self) -> u64 {
        (i64::from(self.i) - i64::from(other.i)).unsigned_abs()
            + (i64::from(self.j) - i64::from(other.j)).unsigned_abs()
    }

    /// The oracle key for this cell and roll purpose, e.g. `"3,-2,spawn"`.
    pub fn roll_key(self, purpose: &str) -> String {
        format!("{},{},{}", self.i, self.j, purpose)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// The value held by a cell or by the player's hand. Either 0 (empty) or a
/// power of two.
pub type CellValue = u64;

/// Returns `true` if `value` may legally occupy a cell: 0 or a power of two.
pub fn is_valid_cell_value(value: CellValue) -> bool {
    value == 0 || value.is_power_of_two()
}

/// What the player is carrying.
///
/// `Holding(v)` always has `v > 0`; the interaction state machine is the
/// only code that constructs it, and only from a nonzero cell value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hand {
    #[default]
    Idle,
    Holding(CellValue),
}

impl Hand {
    /// The carried value, or 0 when idle.
    pub fn value(self) -> CellValue {
        match self {
            Hand::Idle => 0,
            Hand::Holding(v) => v,
        }
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Hand::Idle)
    }
}
