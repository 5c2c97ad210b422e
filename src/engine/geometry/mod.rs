//! Client-side geometry model.
//!
//! [`Geometry`] is a sum type over the supported variants. Every variant, and the
//! enum itself, implements [`GeometryOps`], the shared capability set: bounds,
//! area, length, centroid, validity, intersection and WKT output. Geometries are
//! built through a [`GeometryFactory`] so that parents and children agree on srid
//! and precision. `Clone` is a deep copy, which is what an editing session works
//! on before it mutates coordinates.

use std::fmt;

use crate::model::{Bbox, Coordinate};

mod factory;
mod geo_json;
mod multi;
mod polygon;
mod primitives;
mod relate;
mod wkt;

pub use factory::GeometryFactory;
pub use multi::{MultiLineString, MultiPolygon};
pub use polygon::Polygon;
pub use primitives::{LineString, LinearRing, Point};
pub use relate::Components;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiLineString,
    MultiPolygon,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::LinearRing => "LINEARRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
        };
        f.write_str(name)
    }
}

/// Capabilities shared by all geometry variants.
pub trait GeometryOps {
    fn geometry_type(&self) -> GeometryType;

    fn factory(&self) -> &GeometryFactory;

    fn srid(&self) -> i32 {
        self.factory().srid()
    }

    fn precision(&self) -> i32 {
        self.factory().precision()
    }

    /// All leaf coordinates in traversal order. Empty for empty geometries.
    fn coordinates(&self) -> Vec<Coordinate>;

    fn num_points(&self) -> usize {
        self.coordinates().len()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinates().first().copied()
    }

    fn bounds(&self) -> Option<Bbox> {
        Bbox::from_coordinates(&self.coordinates())
    }

    fn area(&self) -> f64 {
        0.0
    }

    fn length(&self) -> f64 {
        0.0
    }

    fn centroid(&self) -> Option<Coordinate>;

    fn is_empty(&self) -> bool;

    fn is_simple(&self) -> bool;

    fn is_valid(&self) -> bool;

    fn num_geometries(&self) -> usize {
        1
    }

    fn to_wkt(&self) -> String;

    /// Replaces every coordinate by `f(coordinate)`, re-applying the factory's
    /// precision. Rings stay closed.
    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate);

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform_coordinates(&mut |c| c.translated(dx, dy));
    }

    fn components(&self) -> Components<'_>;

    fn intersects(&self, other: &dyn GeometryOps) -> bool {
        relate::intersects(&self.components(), &other.components())
    }

    /// Shortest distance to `coordinate`, zero inside polygons. `None` when empty.
    fn distance(&self, coordinate: &Coordinate) -> Option<f64> {
        relate::distance(&self.components(), coordinate)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
}

macro_rules! dispatch {
    ($geometry:expr, $inner:ident => $body:expr) => {
        match $geometry {
            Geometry::Point($inner) => $body,
            Geometry::LineString($inner) => $body,
            Geometry::LinearRing($inner) => $body,
            Geometry::Polygon($inner) => $body,
            Geometry::MultiLineString($inner) => $body,
            Geometry::MultiPolygon($inner) => $body,
        }
    };
}

impl Geometry {
    /// Child `n` of a composite geometry. Out-of-range indices, and any index on a
    /// non-composite geometry, yield a copy of the geometry itself.
    pub fn geometry_n(&self, n: usize) -> Geometry {
        let child = match self {
            Geometry::MultiLineString(multi) => multi.line_strings().get(n).cloned().map(Geometry::from),
            Geometry::MultiPolygon(multi) => multi.polygons().get(n).cloned().map(Geometry::from),
            _ => None,
        };
        child.unwrap_or_else(|| self.clone())
    }
}

impl GeometryOps for Geometry {
    fn geometry_type(&self) -> GeometryType {
        dispatch!(self, g => g.geometry_type())
    }

    fn factory(&self) -> &GeometryFactory {
        dispatch!(self, g => g.factory())
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        dispatch!(self, g => g.coordinates())
    }

    fn bounds(&self) -> Option<Bbox> {
        dispatch!(self, g => g.bounds())
    }

    fn area(&self) -> f64 {
        dispatch!(self, g => g.area())
    }

    fn length(&self) -> f64 {
        dispatch!(self, g => g.length())
    }

    fn centroid(&self) -> Option<Coordinate> {
        dispatch!(self, g => g.centroid())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, g => g.is_empty())
    }

    fn is_simple(&self) -> bool {
        dispatch!(self, g => g.is_simple())
    }

    fn is_valid(&self) -> bool {
        dispatch!(self, g => g.is_valid())
    }

    fn num_geometries(&self) -> usize {
        dispatch!(self, g => g.num_geometries())
    }

    fn to_wkt(&self) -> String {
        dispatch!(self, g => g.to_wkt())
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        dispatch!(self, g => g.transform_coordinates(f))
    }

    fn components(&self) -> Components<'_> {
        dispatch!(self, g => g.components())
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(Point, LineString, LinearRing, Polygon, MultiLineString, MultiPolygon);

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> GeometryFactory {
        GeometryFactory::new(4326, GeometryFactory::FLOATING)
    }

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        let factory = factory();
        factory.create_polygon(
            Some(factory.create_linear_ring_from_bbox(&Bbox::new(x, y, size, size))),
            Vec::new(),
        )
    }

    fn samples() -> Vec<Geometry> {
        let factory = factory();
        vec![
            factory.create_point(Some(Coordinate::new(3.0, 4.0))).into(),
            factory.create_point(None).into(),
            factory
                .create_line_string(vec![Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 5.0)])
                .into(),
            factory.create_linear_ring_from_bbox(&Bbox::new(0.0, 0.0, 2.0, 2.0)).into(),
            square(0.0, 0.0, 3.0).into(),
            factory
                .create_multi_line_string(vec![factory.create_line_string(vec![
                    Coordinate::new(1.0, 1.0),
                    Coordinate::new(2.0, 2.0),
                ])])
                .into(),
            factory
                .create_multi_polygon(vec![square(0.0, 0.0, 1.0), square(4.0, 4.0, 1.0)])
                .into(),
            factory.create_multi_polygon(Vec::new()).into(),
        ]
    }

    #[test]
    fn test_clone_is_independent() {
        for original in samples() {
            let mut copy = original.clone();
            assert_eq!(copy.to_wkt(), original.to_wkt());
            copy.translate(10.0, 0.0);
            if !original.is_empty() {
                assert_ne!(copy.to_wkt(), original.to_wkt());
            }
        }
    }

    #[test]
    fn test_rings_stay_closed() {
        for geometry in samples() {
            if let Geometry::LinearRing(ring) = &geometry {
                let coords = ring.coordinates();
                assert_eq!(coords.first(), coords.last());
                assert!(!ring.is_valid() || coords.len() >= 4);
            }
        }
    }

    #[test]
    fn test_geometry_n_falls_back_to_self() {
        let multi: Geometry = factory()
            .create_multi_polygon(vec![square(0.0, 0.0, 1.0), square(4.0, 4.0, 1.0)])
            .into();
        assert_eq!(multi.geometry_n(1), Geometry::from(square(4.0, 4.0, 1.0)));
        assert_eq!(multi.geometry_n(2), multi);

        let point: Geometry = factory().create_point(Some(Coordinate::new(1.0, 1.0))).into();
        assert_eq!(point.geometry_n(0), point);
    }

    #[test]
    fn test_intersects() {
        let polygon: Geometry = square(0.0, 0.0, 10.0).into();
        let inside: Geometry = factory().create_point(Some(Coordinate::new(5.0, 5.0))).into();
        let outside: Geometry = factory().create_point(Some(Coordinate::new(15.0, 5.0))).into();
        let crossing: Geometry = factory()
            .create_line_string(vec![Coordinate::new(-5.0, 5.0), Coordinate::new(5.0, 5.0)])
            .into();
        let empty: Geometry = factory().create_point(None).into();

        assert!(polygon.intersects(&inside));
        assert!(inside.intersects(&polygon));
        assert!(!polygon.intersects(&outside));
        assert!(polygon.intersects(&crossing));
        assert!(!polygon.intersects(&empty));
    }

    #[test]
    fn test_multi_intersects_any_child() {
        let multi: Geometry = factory()
            .create_multi_polygon(vec![square(0.0, 0.0, 1.0), square(10.0, 10.0, 1.0)])
            .into();
        let near_second: Geometry = square(10.5, 10.5, 2.0).into();
        let between: Geometry = square(4.0, 4.0, 1.0).into();
        assert!(multi.intersects(&near_second));
        assert!(!multi.intersects(&between));
    }

    #[test]
    fn test_distance() {
        let polygon: Geometry = square(0.0, 0.0, 10.0).into();
        assert_eq!(polygon.distance(&Coordinate::new(5.0, 5.0)), Some(0.0));
        assert_eq!(polygon.distance(&Coordinate::new(13.0, 14.0)), Some(5.0));
        let empty: Geometry = factory().create_multi_polygon(Vec::new()).into();
        assert_eq!(empty.distance(&Coordinate::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_type_names() {
        let names: Vec<String> = samples().iter().map(|g| g.geometry_type().to_string()).collect();
        assert_eq!(names[0], "POINT");
        assert_eq!(names[3], "LINEARRING");
        assert_eq!(names[6], "MULTIPOLYGON");
    }
}
