//! The hex map: a rows x columns grid of tile color indices plus the
//! road and river collections drawn on top of it.

use crate::features::{River, RiverError, Road};
use crate::geometry::{HexCoords, HexLayout, Point};
use crate::palette;

/// A hex tile map. Owns the tile-color grid (flat row-major `Vec`) and
/// the append-only road/river lists. Every tile starts at color index 0.
#[derive(Clone, Debug)]
pub struct HexMap {
    pub rows: usize,
    pub columns: usize,
    pub layout: HexLayout,
    tiles: Vec<usize>,
    roads: Vec<Road>,
    rivers: Vec<River>,
}

impl HexMap {
    pub fn new(rows: usize, columns: usize, layout: HexLayout) -> Self {
        Self {
            rows,
            columns,
            layout,
            tiles: vec![0; rows * columns],
            roads: Vec::new(),
            rivers: Vec::new(),
        }
    }

    /// Construct with initial feature lists. Rivers are assumed already
    /// validated against the same layout (see [`River::new`]).
    pub fn with_features(
        rows: usize,
        columns: usize,
        layout: HexLayout,
        roads: Vec<Road>,
        rivers: Vec<River>,
    ) -> Self {
        Self {
            rows,
            columns,
            layout,
            tiles: vec![0; rows * columns],
            roads,
            rivers,
        }
    }

    fn index(&self, at: HexCoords) -> Result<usize, MapError> {
        if at.row >= self.rows || at.column >= self.columns {
            return Err(MapError::OutOfBounds {
                at,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(at.row * self.columns + at.column)
    }

    /// Color index of the tile at `at`.
    pub fn color_at(&self, at: HexCoords) -> Result<usize, MapError> {
        Ok(self.tiles[self.index(at)?])
    }

    /// Set the tile at `at` to a palette color index.
    pub fn set_color(&mut self, at: HexCoords, color: usize) -> Result<(), MapError> {
        if !palette::is_valid(color) {
            return Err(MapError::InvalidColor { index: color });
        }
        let idx = self.index(at)?;
        self.tiles[idx] = color;
        Ok(())
    }

    pub fn add_road(&mut self, road: Road) {
        self.roads.push(road);
    }

    /// Validate and append a river between two adjacent hexes, using the
    /// map's own layout for the shared-edge match.
    pub fn add_river(
        &mut self,
        start: HexCoords,
        end: HexCoords,
        color: usize,
    ) -> Result<(), RiverError> {
        let river = River::new(start, end, color, &self.layout)?;
        self.rivers.push(river);
        Ok(())
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn rivers(&self) -> &[River] {
        &self.rivers
    }

    /// Iterate over all tiles with their grid coordinates.
    pub fn tiles(&self) -> impl Iterator<Item = (HexCoords, usize)> + '_ {
        self.tiles.iter().enumerate().map(move |(idx, &color)| {
            let at = HexCoords::new(idx / self.columns, idx % self.columns);
            (at, color)
        })
    }

    /// Tight pixel-space bounding size of the tile grid. Odd rows stick
    /// out half a hex width to the right; consecutive rows add one row
    /// step, not a full hex height.
    pub fn image_size(&self) -> Point {
        if self.rows == 0 || self.columns == 0 {
            return Point::new(0.0, 0.0);
        }

        let stagger = if self.rows > 1 {
            self.layout.odd_row_offset()
        } else {
            0.0
        };
        let width = self.columns as f64 * self.layout.width() + stagger;
        let height = self.layout.height() + (self.rows - 1) as f64 * self.layout.row_step();
        Point::new(width, height)
    }
}

/// Grid access failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Coordinates outside the rows x columns grid.
    OutOfBounds {
        at: HexCoords,
        rows: usize,
        columns: usize,
    },
    /// Color index with no palette entry.
    InvalidColor { index: usize },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::OutOfBounds { at, rows, columns } => write!(
                f,
                "coordinates ({}, {}) out of bounds for a {}x{} map",
                at.row, at.column, rows, columns
            ),
            MapError::InvalidColor { index } => write!(f, "invalid color index {}", index),
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_default_to_background() {
        for (rows, columns) in [(1, 1), (3, 4), (7, 2)] {
            let map = HexMap::new(rows, columns, HexLayout::default());
            for row in 0..rows {
                for column in 0..columns {
                    assert_eq!(map.color_at(HexCoords::new(row, column)).unwrap(), 0);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = HexMap::new(0, 0, HexLayout::default());
        assert!(empty.tiles().next().is_none());
        assert!(empty.image_size().approx_eq(Point::new(0.0, 0.0)));

        let no_rows = HexMap::new(0, 5, HexLayout::default());
        assert!(no_rows.image_size().approx_eq(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_set_and_get() {
        let mut map = HexMap::new(2, 2, HexLayout::default());
        map.set_color(HexCoords::new(1, 0), 3).unwrap();
        assert_eq!(map.color_at(HexCoords::new(1, 0)).unwrap(), 3);
        assert_eq!(map.color_at(HexCoords::new(0, 0)).unwrap(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut map = HexMap::new(2, 3, HexLayout::default());

        let err = map.color_at(HexCoords::new(2, 0)).unwrap_err();
        assert_eq!(
            err,
            MapError::OutOfBounds {
                at: HexCoords::new(2, 0),
                rows: 2,
                columns: 3,
            }
        );
        assert!(map.set_color(HexCoords::new(0, 3), 1).is_err());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut map = HexMap::new(1, 1, HexLayout::default());
        let err = map.set_color(HexCoords::new(0, 0), 999).unwrap_err();
        assert_eq!(err, MapError::InvalidColor { index: 999 });
    }

    #[test]
    fn test_add_river_validates_adjacency() {
        let mut map = HexMap::new(3, 3, HexLayout::default());
        assert!(map
            .add_river(HexCoords::new(0, 0), HexCoords::new(0, 1), 3)
            .is_ok());
        assert!(map
            .add_river(HexCoords::new(0, 0), HexCoords::new(2, 2), 3)
            .is_err());
        assert_eq!(map.rivers().len(), 1);
    }

    #[test]
    fn test_with_features() {
        let layout = HexLayout::default();
        let roads = vec![Road::new(HexCoords::new(0, 0), HexCoords::new(2, 2), 1)];
        let rivers =
            vec![River::new(HexCoords::new(1, 1), HexCoords::new(1, 2), 2, &layout).unwrap()];

        let map = HexMap::with_features(3, 3, layout, roads, rivers);
        assert_eq!(map.roads().len(), 1);
        assert_eq!(map.rivers().len(), 1);
        assert_eq!(map.color_at(HexCoords::new(2, 2)).unwrap(), 0);
    }

    #[test]
    fn test_image_size() {
        let layout = HexLayout::new(50.0);
        let w = layout.width();

        let single = HexMap::new(1, 1, layout);
        assert!(single.image_size().approx_eq(Point::new(w, 100.0)));

        // Two rows: half-hex stagger on the right, one extra row step.
        let grid = HexMap::new(2, 3, layout);
        assert!(grid
            .image_size()
            .approx_eq(Point::new(3.0 * w + w / 2.0, 100.0 + 75.0)));
    }
}
