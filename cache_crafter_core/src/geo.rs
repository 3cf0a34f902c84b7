// Mapping between grid cells and latitude/longitude.
//
// The game overlays its grid on a real map: cell (i, j) is the rectangle
// whose south-west corner sits `i` tiles north and `j` tiles east of the
// frame origin, each tile `tile_degrees` on a side. The map collaborator
// uses these helpers to draw cell rectangles and to turn a map click into a
// `CellCoord`. Nothing in the interaction logic depends on this module.

use crate::types::CellCoord;
use serde::{Deserialize, Serialize};

/// A point on the map, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The lat/lng rectangle covered by one cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl CellBounds {
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// Anchors the grid on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoFrame {
    /// South-west corner of cell (0, 0).
    pub origin: LatLng,
    /// Side length of a cell, in degrees of both latitude and longitude.
    pub tile_degrees: f64,
}

impl GeoFrame {
    /// The lecture hall the game is set in.
    pub const CLASSROOM: LatLng = LatLng::new(36.997936938057016, -122.05703507501151);

    pub fn cell_bounds(&self, coord: CellCoord) -> CellBounds {
        let d = self.tile_degrees;
        CellBounds {
            south_west: LatLng::new(
                self.origin.lat + f64::from(coord.i) * d,
                self.origin.lng + f64::from(coord.j) * d,
            ),
            north_east: LatLng::new(
                self.origin.lat + (f64::from(coord.i) + 1.0) * d,
                self.origin.lng + (f64::from(coord.j) + 1.0) * d,
            ),
        }
    }

    /// The cell containing `point`. Points exactly on a boundary belong to
    /// the cell to their north/east. `None` for non-finite points and for
    /// points outside the `i32` grid.
    pub fn cell_at(&self, point: LatLng) -> Option<CellCoord> {
        let i = tile_index((point.lat - self.origin.lat) / self.tile_degrees)?;
        let j = tile_index((point.lng - self.origin.lng) / self.tile_degrees)?;
        Some(CellCoord::new(i, j))
    }
}

fn tile_index(offset: f64) -> Option<i32> {
    let floored = offset.floor();
    // NaN fails the range test too.
    if (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&floored) {
        Some(floored as i32)
    } else {
        None
    }
}

impl Default for GeoFrame {
    fn default() -> Self {
        Self {
            origin: Self::CLASSROOM,
            tile_degrees: 1e-4,
        }
    }
}
