use std::fmt;

/// Immutable 2-D position. Equality is exact, use [`Coordinate::equals_delta`]
/// for approximate comparisons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn equals_delta(&self, other: &Coordinate, delta: f64) -> bool {
        (self.x - other.x).abs() <= delta && (self.y - other.y).abs() <= delta
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Coordinate {
        Coordinate::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

/// Axis-aligned rectangle stored as origin plus size. Width and height are never
/// negative; an absent region is expressed as `Option<Bbox>::None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bbox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bbox {
    /// Negative sizes are normalized by moving the origin.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
        Bbox { x, y, width, height }
    }

    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Bbox {
            x: min_x,
            y: min_y,
            width: a.x.max(b.x) - min_x,
            height: a.y.max(b.y) - min_y,
        }
    }

    /// Smallest bbox holding every coordinate, `None` for an empty slice.
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Option<Self> {
        let first = coordinates.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for c in &coordinates[1..] {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        Some(Bbox::from_corners(
            Coordinate::new(min_x, min_y),
            Coordinate::new(max_x, max_y),
        ))
    }

    pub fn centered_at(center: Coordinate, width: f64, height: f64) -> Self {
        Bbox::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    pub fn end_point(&self) -> Coordinate {
        Coordinate::new(self.max_x(), self.max_y())
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains_coordinate(&self, c: &Coordinate) -> bool {
        c.x >= self.x && c.x <= self.max_x() && c.y >= self.y && c.y <= self.max_y()
    }

    pub fn contains(&self, other: &Bbox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Touching edges count as overlap.
    pub fn intersects(&self, other: &Bbox) -> bool {
        !(other.x > self.max_x()
            || other.max_x() < self.x
            || other.y > self.max_y()
            || other.max_y() < self.y)
    }

    pub fn intersection(&self, other: &Bbox) -> Option<Bbox> {
        if !self.intersects(other) {
            return None;
        }
        Some(Bbox::from_corners(
            Coordinate::new(self.x.max(other.x), self.y.max(other.y)),
            Coordinate::new(self.max_x().min(other.max_x()), self.max_y().min(other.max_y())),
        ))
    }

    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox::from_corners(
            Coordinate::new(self.x.min(other.x), self.y.min(other.y)),
            Coordinate::new(self.max_x().max(other.max_x()), self.max_y().max(other.max_y())),
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Bbox {
        Bbox::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn equals_delta(&self, other: &Bbox, delta: f64) -> bool {
        (self.x - other.x).abs() <= delta
            && (self.y - other.y).abs() <= delta
            && (self.width - other.width).abs() <= delta
            && (self.height - other.height).abs() <= delta
    }
}

impl fmt::Display for Bbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bbox[{}, {}, {}, {}]", self.x, self.y, self.width, self.height)
    }
}

/// Union where an absent operand yields the other one.
pub fn union_bounds(a: Option<Bbox>, b: Option<Bbox>) -> Option<Bbox> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}
