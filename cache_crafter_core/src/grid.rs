// The grid accessor: the single read path and single write path for cells.
//
// `current_value()` returns the override if one exists, else the procedural
// base value. `set_current_value()` routes through the override store
// (which drops entries that match the base) and reports a `CellChange` only
// when the value a reader would see actually changed. That report is the
// cell-changed notification the renderer consumes.
//
// `try_set_current_value()` is the validated variant for values that come
// from outside the state machine: it rejects anything that is neither 0 nor
// a power of two.
//
// See also: `procgen.rs` for the base layer, `overrides.rs` for the store,
// `game.rs` for the state machine, which is the only writer in normal play.

use crate::error::GridError;
use crate::oracle::ValueOracle;
use crate::overrides::OverrideStore;
use crate::procgen::BaseLayer;
use crate::types::{CellCoord, CellValue, is_valid_cell_value};
use serde::{Deserialize, Serialize};

/// A cell whose displayed value changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coord: CellCoord,
    pub old: CellValue,
    pub new: CellValue,
}

#[derive(Clone, Debug)]
pub struct Grid<O> {
    base: BaseLayer<O>,
    overrides: OverrideStore,
}

impl<O: ValueOracle> Grid<O> {
    pub fn new(base: BaseLayer<O>) -> Self {
        Self {
            base,
            overrides: OverrideStore::new(),
        }
    }

    pub fn base_value(&self, coord: CellCoord) -> CellValue {
        self.base.base_value(coord)
    }

    pub fn current_value(&self, coord: CellCoord) -> CellValue {
        self.overrides
            .get(coord)
            .unwrap_or_else(|| self.base.base_value(coord))
    }

    /// Set the current value of `coord`. Returns the change if the value
    /// `current_value` reports is different afterwards.
    pub fn set_current_value(&mut self, coord: CellCoord, value: CellValue) -> Option<CellChange> {
        let base = self.base.base_value(coord);
        let old = self.overrides.get(coord).unwrap_or(base);
        self.overrides.set(coord, value, base);
        (old != value).then_some(CellChange {
            coord,
            old,
            new: value,
        })
    }

    /// Like `set_current_value`, but rejects values that are not 0 or a
    /// power of two.
    pub fn try_set_current_value(
        &mut self,
        coord: CellCoord,
        value: CellValue,
    ) -> Result<Option<CellChange>, GridError> {
        if !is_valid_cell_value(value) {
            return Err(GridError::InvalidValue { coord, value });
        }
        Ok(self.set_current_value(coord, value))
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::HashOracle;

    fn hashed_grid() -> Grid<HashOracle> {
        Grid::new(BaseLayer::new(HashOracle, 0.35))
    }

    /// Find a nearby cell with a nonzero base value.
    fn occupied_cell(grid: &Grid<HashOracle>) -> CellCoord {
        (0..100)
            .map(|j| CellCoord::new(0, j))
            .find(|&c| grid.base_value(c) > 0)
            .unwrap()
    }

    #[test]
    fn untouched_cells_read_base_value() {
        let grid = hashed_grid();
        for i in -10..10 {
            let c = CellCoord::new(i, 2 * i);
            assert_eq!(grid.current_value(c), grid.base_value(c));
        }
        assert!(grid.overrides().is_empty());
    }

    #[test]
    fn set_records_override_and_reports_change() {
        let mut grid = hashed_grid();
        let c = occupied_cell(&grid);
        let base = grid.base_value(c);

        let change = grid.set_current_value(c, 0).unwrap();
        assert_eq!(
            change,
            CellChange {
                coord: c,
                old: base,
                new: 0
            }
        );
        assert_eq!(grid.current_value(c), 0);
        assert!(grid.overrides().contains(c));
    }

    #[test]
    fn setting_back_to_base_purges_override() {
        let mut grid = hashed_grid();
        let c = occupied_cell(&grid);
        let base = grid.base_value(c);

        grid.set_current_value(c, 0);
        let change = grid.set_current_value(c, base).unwrap();
        assert_eq!(change.new, base);
        assert_eq!(grid.current_value(c), base);
        assert!(!grid.overrides().contains(c));
        assert!(grid.overrides().is_empty());
    }

    #[test]
    fn unchanged_value_reports_nothing() {
        let mut grid = hashed_grid();
        let c = occupied_cell(&grid);
        let base = grid.base_value(c);
        assert_eq!(grid.set_current_value(c, base), None);
        assert!(grid.overrides().is_empty());

        grid.set_current_value(c, 64);
        assert_eq!(grid.set_current_value(c, 64), None);
    }

    #[test]
    fn try_set_rejects_non_powers_of_two() {
        let mut grid = hashed_grid();
        let c = CellCoord::new(7, 7);
        let before = grid.current_value(c);
        assert_eq!(
            grid.try_set_current_value(c, 6),
            Err(GridError::InvalidValue { coord: c, value: 6 })
        );
        assert_eq!(grid.current_value(c), before);
        assert!(grid.overrides().is_empty());
    }

    #[test]
    fn try_set_accepts_zero_and_powers_of_two() {
        let mut grid = hashed_grid();
        let c = CellCoord::new(7, 7);
        assert!(grid.try_set_current_value(c, 32).is_ok());
        assert_eq!(grid.current_value(c), 32);
        assert!(grid.try_set_current_value(c, 0).is_ok());
        assert_eq!(grid.current_value(c), 0);
    }
}
