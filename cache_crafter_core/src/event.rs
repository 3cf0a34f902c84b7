// Notifications emitted by the core for the renderer / UI.
//
// The core has no callbacks. Each call that can change state returns a
// `StepResult` listing what changed, in the order it happened:
// - `CellChanged`: a cell's displayed value differs from before the click.
// - `HoldingChanged`: the hand changed (every pickup, merge and drop).
// - `Won`: a merge reached the win threshold. Play continues afterwards.
//
// Within one click the order is always cell change, then holding change,
// then win. `turn` numbers each processed click (accepted or not) from 1.
//
// See also: `game.rs` for where these are produced.

use crate::types::{CellCoord, CellValue};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub turn: u64,
    pub kind: GameEventKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// The value shown for `coord` is now `value`.
    CellChanged { coord: CellCoord, value: CellValue },
    /// The player now holds `holding` (0 = nothing).
    HoldingChanged { holding: CellValue },
    /// A merge produced `value`, at or above the win threshold.
    Won { value: CellValue },
}

/// What one call into the core produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepResult {
    pub events: Vec<GameEvent>,
}

impl StepResult {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The win value, if this step contains a win.
    pub fn won(&self) -> Option<CellValue> {
        self.events.iter().find_map(|e| match e.kind {
            GameEventKind::Won { value } => Some(value),
            _ => None,
        })
    }

    pub(crate) fn extend(&mut self, other: StepResult) {
        self.events.extend(other.events);
    }
}
