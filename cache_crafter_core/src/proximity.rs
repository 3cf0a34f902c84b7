// Proximity gate: which cells the player can reach.
//
// A cell is nearby iff its Manhattan distance from the player's fixed
// position is at most `radius`. Every click passes through this gate first;
// cells outside it are inert whatever they hold.

use crate::types::CellCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProximityGate {
    origin: CellCoord,
    radius: u32,
}

impl ProximityGate {
    pub fn new(origin: CellCoord, radius: u32) -> Self {
        Self { origin, radius }
    }

    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    pub fn is_nearby(&self, coord: CellCoord) -> bool {
        self.origin.manhattan_distance(coord) <= u64::from(self.radius)
    }
}
