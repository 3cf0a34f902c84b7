// Player actions that drive the game.
//
// All player input reaches the core as a `PlayerAction`. The renderer
// translates a click on the map into `PlayerAction::ClickCell` (using
// `GeoFrame::cell_at` if it works in lat/lng) and hands it to
// `GameCore::apply()`, or calls `GameCore::on_cell_clicked()` directly.
//
// Actions are serialisable so a driver can script or replay a session as a
// JSON list.
//
// See also: `game.rs` for the handler, `event.rs` for what comes back.

use crate::types::CellCoord;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// The player clicked a cell. Pickup, merge, drop, or nothing, depending
    /// on the cell, the hand, and whether the cell is in reach.
    ClickCell { coord: CellCoord },
}
