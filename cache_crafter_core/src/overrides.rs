// Sparse store of cells whose value differs from the procedural base.
//
// The grid is unbounded, so the store only records deviations. Invariant:
// an entry exists for a coordinate iff its current value differs from its
// base value. `set()` takes the base value and drops the entry when the new
// value matches it, so memory stays proportional to the number of cells the
// player has actually altered, not the number visited or rendered.
//
// Backed by `FxHashMap`: O(1) expected lookup, and the hasher has no
// per-process random state.

use crate::types::{CellCoord, CellValue};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct OverrideStore {
    entries: FxHashMap<CellCoord, CellValue>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded override for `coord`, if any.
    pub fn get(&self, coord: CellCoord) -> Option<CellValue> {
        self.entries.get(&coord).copied()
    }

    /// Record `value` for `coord`, or remove the entry if `value == base`.
    pub fn set(&mut self, coord: CellCoord, value: CellValue, base: CellValue) {
        if value == base {
            self.entries.remove(&coord);
        } else {
            self.entries.insert(coord, value);
        }
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All overrides, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellValue)> + '_ {
        self.entries.iter().map(|(&c, &v)| (c, v))
    }
}
