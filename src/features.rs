//! Linear map features: roads between hex centers and rivers along
//! shared hex edges.

use crate::geometry::{HexCoords, HexLayout, Point};

/// A road between any two hexes, drawn as a straight line between their
/// centers. No adjacency requirement. Endpoints are an unordered pair;
/// roads carry no direction.
#[derive(Clone, Copy, Debug)]
pub struct Road {
    pub start: HexCoords,
    pub end: HexCoords,
    /// Palette index of the road color.
    pub color: usize,
}

impl Road {
    pub fn new(start: HexCoords, end: HexCoords, color: usize) -> Self {
        Self { start, end, color }
    }
}

/// A river running along the edge shared by two adjacent hexes.
///
/// Construction validates adjacency: the two hexes' polygons must have
/// exactly two coincident vertices (one shared edge). Those two vertices
/// are the drawn segment.
#[derive(Clone, Copy, Debug)]
pub struct River {
    pub start: HexCoords,
    pub end: HexCoords,
    /// Palette index of the river color.
    pub color: usize,
    segment: [Point; 2],
}

impl River {
    /// Build a river between two edge-adjacent hexes.
    ///
    /// The shared vertices are found by a pairwise scan of the two
    /// 6-vertex polygons under the [`Point`] tolerance. The segment
    /// endpoints are sorted by (x, y) so the result does not depend on
    /// scan order.
    pub fn new(
        start: HexCoords,
        end: HexCoords,
        color: usize,
        layout: &HexLayout,
    ) -> Result<Self, RiverError> {
        let a = start.polygon(layout);
        let b = end.polygon(layout);

        let mut shared = Vec::new();
        for va in &a {
            for vb in &b {
                if va.approx_eq(*vb) {
                    shared.push(*va);
                }
            }
        }

        if shared.len() != 2 {
            return Err(RiverError::NotAdjacent {
                shared: shared.len(),
            });
        }

        shared.sort_by(|p, q| {
            p.x.partial_cmp(&q.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(p.y.partial_cmp(&q.y).unwrap_or(std::cmp::Ordering::Equal))
        });

        Ok(Self {
            start,
            end,
            color,
            segment: [shared[0], shared[1]],
        })
    }

    /// The two shared-edge vertices the river is drawn between.
    pub fn segment(&self) -> [Point; 2] {
        self.segment
    }
}

/// River construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverError {
    /// The two hexes do not share exactly one edge. Identical hexes share
    /// all 6 vertices; non-neighbors share none.
    NotAdjacent { shared: usize },
}

impl std::fmt::Display for RiverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiverError::NotAdjacent { shared } => write!(
                f,
                "invalid river: hexes share {} vertices, expected exactly 2 (one edge)",
                shared
            ),
        }
    }
}

impl std::error::Error for RiverError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_polygon(point: Point, polygon: &[Point; 6]) -> bool {
        polygon.iter().any(|v| v.approx_eq(point))
    }

    #[test]
    fn test_river_same_row_neighbors() {
        let layout = HexLayout::new(50.0);
        let a = HexCoords::new(0, 0);
        let b = HexCoords::new(0, 1);

        let river = River::new(a, b, 3, &layout).unwrap();
        let segment = river.segment();

        for endpoint in segment {
            assert!(on_polygon(endpoint, &a.polygon(&layout)));
            assert!(on_polygon(endpoint, &b.polygon(&layout)));
        }
        // The shared edge between row neighbors is vertical.
        assert!((segment[0].x - segment[1].x).abs() < 1e-9);
        assert!(((segment[0].y - segment[1].y).abs() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_river_cross_row_neighbors() {
        let layout = HexLayout::new(50.0);
        let a = HexCoords::new(0, 0);
        let b = HexCoords::new(1, 0);

        let river = River::new(a, b, 3, &layout).unwrap();
        for endpoint in river.segment() {
            assert!(on_polygon(endpoint, &a.polygon(&layout)));
            assert!(on_polygon(endpoint, &b.polygon(&layout)));
        }
    }

    #[test]
    fn test_river_endpoints_sorted() {
        let layout = HexLayout::new(50.0);

        // Construct the same river both ways round; the segment must come
        // out identical.
        let forward = River::new(HexCoords::new(2, 2), HexCoords::new(2, 3), 0, &layout).unwrap();
        let backward = River::new(HexCoords::new(2, 3), HexCoords::new(2, 2), 0, &layout).unwrap();

        assert!(forward.segment()[0].approx_eq(backward.segment()[0]));
        assert!(forward.segment()[1].approx_eq(backward.segment()[1]));

        let [p, q] = forward.segment();
        assert!(p.x < q.x || (p.x - q.x).abs() <= 1e-9 && p.y <= q.y);
    }

    #[test]
    fn test_river_rejects_non_adjacent() {
        let layout = HexLayout::new(50.0);
        let err = River::new(HexCoords::new(0, 0), HexCoords::new(0, 2), 1, &layout).unwrap_err();
        assert_eq!(err, RiverError::NotAdjacent { shared: 0 });
    }

    #[test]
    fn test_river_rejects_identical_hexes() {
        let layout = HexLayout::new(50.0);
        let err = River::new(HexCoords::new(1, 1), HexCoords::new(1, 1), 1, &layout).unwrap_err();
        assert_eq!(err, RiverError::NotAdjacent { shared: 6 });
    }

    #[test]
    fn test_river_odd_row_diagonal_neighbor() {
        let layout = HexLayout::new(50.0);
        // Odd rows shift right, so (1, 0) also touches (0, 1).
        let river = River::new(HexCoords::new(1, 0), HexCoords::new(0, 1), 2, &layout);
        assert!(river.is_ok());
    }
}
