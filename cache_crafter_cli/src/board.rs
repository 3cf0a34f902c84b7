// Text rendering of the player's neighborhood.
//
// North (higher `i`) is at the top, east (higher `j`) to the right. Each
// cell shows its value, `.` when empty, or `@` for the player's own cell when
// empty. Cells in reach are wrapped in brackets. Every column is as wide as
// the longest value on the board, and never narrower than three characters.

use std::collections::BTreeMap;

use cache_crafter_core::game::GameCore;
use cache_crafter_core::oracle::ValueOracle;
use cache_crafter_core::types::{CellCoord, CellValue};

const MIN_CELL_WIDTH: usize = 3;

pub fn render_board<O: ValueOracle>(game: &GameCore<O>) -> String {
    let origin = game.config().player_origin;
    let cells: Vec<(CellCoord, CellValue)> = game.neighborhood().collect();
    let width = cells
        .iter()
        .map(|&(_, value)| value.to_string().len())
        .fold(MIN_CELL_WIDTH, usize::max);

    let mut rows: BTreeMap<i32, String> = BTreeMap::new();
    for (coord, value) in cells {
        let cell = cell_text(coord, value, origin, game.is_nearby(coord), width);
        rows.entry(coord.i).or_default().push_str(&cell);
    }

    let mut out = String::new();
    for line in rows.values().rev() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn cell_text(
    coord: CellCoord,
    value: CellValue,
    origin: CellCoord,
    nearby: bool,
    width: usize,
) -> String {
    let token = match value {
        0 if coord == origin => "@".to_string(),
        0 => ".".to_string(),
        v => v.to_string(),
    };
    if nearby {
        format!("[{token:>width$}]")
    } else {
        format!(" {token:>width$} ")
    }
}
