//! Hex grid geometry: pixel-space points, layout metrics, and the
//! (row, column) -> center / polygon mapping for a staggered hex grid.

use std::ops::{Add, Mul, Neg, Sub};

/// Absolute per-component tolerance for point equality.
///
/// Polygon vertices come out of trigonometric math, so two copies of the
/// "same" vertex computed from different hex centers differ by round-off.
/// The tolerance has to swallow that drift without merging distinct
/// vertices (the closest pair on a hex is one side apart, ~R pixels).
pub const EPSILON: f64 = 1e-7;

/// A 2D point/vector in pixel space. Equality is tolerance-based
/// ([`Point::approx_eq`]), so no `PartialEq` is provided.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise absolute value.
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Tolerant equality: each component within [`EPSILON`].
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    fn mul(self, p: Point) -> Point {
        p * self
    }
}

/// Hex sizing configuration. All derived metrics come from the single
/// circumradius so different maps can use different hex sizes.
#[derive(Clone, Copy, Debug)]
pub struct HexLayout {
    /// Distance from hex center to each vertex, in pixels.
    pub radius: f64,
}

impl HexLayout {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Flat-to-flat width of a pointy-top hex: 2R*cos(30).
    pub fn width(&self) -> f64 {
        2.0 * self.radius * (std::f64::consts::PI / 6.0).cos()
    }

    /// Vertex-to-vertex height: 2R.
    pub fn height(&self) -> f64 {
        2.0 * self.radius
    }

    /// Edge length: 2R*sin(30) = R.
    pub fn side(&self) -> f64 {
        2.0 * self.radius * (std::f64::consts::PI / 6.0).sin()
    }

    /// Vertical overlap between consecutive rows: R*(1 - sin(30)).
    pub fn row_overlap(&self) -> f64 {
        self.radius * (1.0 - (std::f64::consts::PI / 6.0).sin())
    }

    /// Center-to-center vertical distance between rows. Rows interlock,
    /// so this is less than the full hex height.
    pub fn row_step(&self) -> f64 {
        self.height() - self.row_overlap()
    }

    /// Horizontal shift applied to odd rows (brick layout).
    pub fn odd_row_offset(&self) -> f64 {
        self.width() / 2.0
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self { radius: 50.0 }
    }
}

/// A tile position in the hex grid. Pure index; pixel geometry is derived
/// on demand from a [`HexLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexCoords {
    pub row: usize,
    pub column: usize,
}

impl HexCoords {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Pixel center of this hex. Odd rows shift right by half a hex width
    /// so the rows interlock.
    pub fn center(&self, layout: &HexLayout) -> Point {
        let w = layout.width();
        let x_offset = if self.row % 2 == 0 {
            0.0
        } else {
            layout.odd_row_offset()
        };

        let x = x_offset + w / 2.0 + self.column as f64 * w;
        let y = layout.height() / 2.0 + self.row as f64 * layout.row_step();
        Point::new(x, y)
    }

    /// The six polygon vertices, pointy-top, starting from the bottom
    /// vertex and walking around. The ordering is fixed: river edge
    /// matching relies on adjacent hexes producing coincident vertices.
    pub fn polygon(&self, layout: &HexLayout) -> [Point; 6] {
        let c = layout.radius * (std::f64::consts::PI / 6.0).cos();
        let s = layout.radius * (std::f64::consts::PI / 6.0).sin();

        let a = Point::new(0.0, layout.radius);
        let b = Point::new(c, s);
        let d = Point::new(c, -s);

        let center = self.center(layout);
        [
            center + a,
            center + b,
            center + d,
            center + -a,
            center + -b,
            center + -d,
        ]
    }

    /// True if `point` lies inside this hex (boundary counts as inside).
    ///
    /// Works in the hex's own quadrant-folded frame: the only sloped
    /// boundary is the corner edge from (0, R) down to (W/2, R/2).
    pub fn contains(&self, point: Point, layout: &HexLayout) -> bool {
        let d = (point - self.center(layout)).abs();

        let half_width = layout.width() / 2.0;
        let slope = -(layout.radius / 2.0) / half_width;
        let top_line = layout.radius + slope * d.x;

        d.x <= half_width && d.y <= top_line
    }
}
