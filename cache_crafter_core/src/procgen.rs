// Procedural base layer: what every cell holds before the player touches it.
//
// Two rolls per cell, both against the value oracle:
// - `"{i},{j},spawn"` < `spawn_probability` decides whether the cell holds a
//   token at all;
// - `"{i},{j},value"` picks the token from four equal-width buckets:
//   [0, .25) → 1, [.25, .5) → 2, [.5, .75) → 4, [.75, 1) → 8.
//
// Base values are never stored. `BaseLayer` holds only the oracle and the
// spawn probability, so the same coordinate yields the same value no matter
// when or in what order it is asked.

use crate::oracle::ValueOracle;
use crate::types::{CellCoord, CellValue};

/// Upper bounds of the value buckets, paired with the value each produces.
/// Contiguous and covering [0, 1).
const VALUE_BUCKETS: [(f64, CellValue); 4] = [(0.25, 1), (0.5, 2), (0.75, 4), (1.0, 8)];

#[derive(Clone, Debug)]
pub struct BaseLayer<O> {
    oracle: O,
    spawn_probability: f64,
}

impl<O: ValueOracle> BaseLayer<O> {
    pub fn new(oracle: O, spawn_probability: f64) -> Self {
        Self {
            oracle,
            spawn_probability,
        }
    }

    pub fn spawns(&self, coord: CellCoord) -> bool {
        self.oracle.roll(&coord.roll_key("spawn")) < self.spawn_probability
    }

    /// The procedural value of `coord`: 0, or one of 1, 2, 4, 8.
    pub fn base_value(&self, coord: CellCoord) -> CellValue {
        if !self.spawns(coord) {
            return 0;
        }
        let r = self.oracle.roll(&coord.roll_key("value"));
        VALUE_BUCKETS
            .iter()
            .find(|&&(upper, _)| r < upper)
            .map_or(8, |&(_, value)| value)
    }
}
