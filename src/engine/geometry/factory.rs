use crate::model::{Bbox, Coordinate};

use super::{Geometry, LineString, LinearRing, MultiLineString, MultiPolygon, Point, Polygon};

/// Stamps srid and precision on every geometry it builds. Children handed to a
/// composite constructor are rebuilt by the receiving factory, so a parent and its
/// children always agree on both values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryFactory {
    srid: i32,
    precision: i32,
}

impl Default for GeometryFactory {
    fn default() -> Self {
        GeometryFactory::new(0, GeometryFactory::FLOATING)
    }
}

impl GeometryFactory {
    /// Precision value that disables rounding.
    pub const FLOATING: i32 = -1;

    pub fn new(srid: i32, precision: i32) -> Self {
        GeometryFactory { srid, precision }
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn precision(&self) -> i32 {
        self.precision
    }

    /// Rounds to `precision` decimals, or returns the input for floating precision.
    pub fn snap(&self, coordinate: Coordinate) -> Coordinate {
        if self.precision < 0 {
            return coordinate;
        }
        let factor = 10f64.powi(self.precision);
        Coordinate::new(
            (coordinate.x * factor).round() / factor,
            (coordinate.y * factor).round() / factor,
        )
    }

    fn snap_all(&self, coordinates: Vec<Coordinate>) -> Vec<Coordinate> {
        if self.precision < 0 {
            return coordinates;
        }
        coordinates.into_iter().map(|c| self.snap(c)).collect()
    }

    pub fn create_point(&self, coordinate: Option<Coordinate>) -> Point {
        Point {
            factory: *self,
            coordinate: coordinate.map(|c| self.snap(c)),
        }
    }

    pub fn create_line_string(&self, coordinates: Vec<Coordinate>) -> LineString {
        LineString {
            factory: *self,
            coordinates: self.snap_all(coordinates),
        }
    }

    /// Open input is closed by repeating the first coordinate.
    pub fn create_linear_ring(&self, coordinates: Vec<Coordinate>) -> LinearRing {
        let mut coordinates = self.snap_all(coordinates);
        if let Some(first) = coordinates.first().copied() {
            if coordinates.len() == 1 || coordinates.last() != Some(&first) {
                coordinates.push(first);
            }
        }
        LinearRing {
            factory: *self,
            coordinates,
        }
    }

    /// Counter-clockwise ring tracing the outline of `bbox`.
    pub fn create_linear_ring_from_bbox(&self, bbox: &Bbox) -> LinearRing {
        self.create_linear_ring(vec![
            bbox.origin(),
            Coordinate::new(bbox.max_x(), bbox.y()),
            bbox.end_point(),
            Coordinate::new(bbox.x(), bbox.max_y()),
        ])
    }

    pub fn create_polygon(&self, exterior: Option<LinearRing>, interiors: Vec<LinearRing>) -> Polygon {
        let exterior = match exterior {
            Some(ring) => self.adopt_ring(ring),
            None => self.create_linear_ring(Vec::new()),
        };
        Polygon {
            factory: *self,
            exterior,
            interiors: interiors.into_iter().map(|ring| self.adopt_ring(ring)).collect(),
        }
    }

    pub fn create_multi_line_string(&self, line_strings: Vec<LineString>) -> MultiLineString {
        MultiLineString {
            factory: *self,
            line_strings: line_strings
                .into_iter()
                .map(|line| self.create_line_string(line.coordinates))
                .collect(),
        }
    }

    pub fn create_multi_polygon(&self, polygons: Vec<Polygon>) -> MultiPolygon {
        MultiPolygon {
            factory: *self,
            polygons: polygons
                .into_iter()
                .map(|polygon| self.create_polygon(Some(polygon.exterior), polygon.interiors))
                .collect(),
        }
    }

    /// Deep copy of `geometry` re-stamped with this factory's srid and precision.
    pub fn create_geometry(&self, geometry: &Geometry) -> Geometry {
        match geometry.clone() {
            Geometry::Point(p) => Geometry::Point(self.create_point(p.coordinate)),
            Geometry::LineString(l) => Geometry::LineString(self.create_line_string(l.coordinates)),
            Geometry::LinearRing(r) => Geometry::LinearRing(self.adopt_ring(r)),
            Geometry::Polygon(p) => {
                Geometry::Polygon(self.create_polygon(Some(p.exterior), p.interiors))
            }
            Geometry::MultiLineString(m) => {
                Geometry::MultiLineString(self.create_multi_line_string(m.line_strings))
            }
            Geometry::MultiPolygon(m) => {
                Geometry::MultiPolygon(self.create_multi_polygon(m.polygons))
            }
        }
    }

    fn adopt_ring(&self, ring: LinearRing) -> LinearRing {
        if ring.factory == *self {
            return ring;
        }
        self.create_linear_ring(ring.coordinates)
    }
}
