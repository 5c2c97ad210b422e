use crate::engine::mathlib;
use crate::model::Coordinate;

use super::{wkt, Components, GeometryFactory, GeometryOps, GeometryType};

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub(super) factory: GeometryFactory,
    pub(super) coordinate: Option<Coordinate>,
}

impl Point {
    pub fn x(&self) -> Option<f64> {
        self.coordinate.map(|c| c.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.coordinate.map(|c| c.y)
    }
}

impl GeometryOps for Point {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.coordinate.into_iter().collect()
    }

    fn centroid(&self) -> Option<Coordinate> {
        self.coordinate
    }

    fn is_empty(&self) -> bool {
        self.coordinate.is_none()
    }

    fn is_simple(&self) -> bool {
        true
    }

    fn is_valid(&self) -> bool {
        self.coordinate.is_none_or(|c| c.is_finite())
    }

    fn to_wkt(&self) -> String {
        wkt::tagged("POINT", self.coordinate.map(|c| format!("({c})")))
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        self.coordinate = self.coordinate.map(|c| self.factory.snap(f(c)));
    }

    fn components(&self) -> Components<'_> {
        Components {
            paths: self.coordinate.as_ref().map(std::slice::from_ref).into_iter().collect(),
            polygons: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineString {
    pub(super) factory: GeometryFactory,
    pub(super) coordinates: Vec<Coordinate>,
}

impl LineString {
    pub fn coordinate_slice(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn is_closed(&self) -> bool {
        self.coordinates.len() > 2 && self.coordinates.first() == self.coordinates.last()
    }
}

impl GeometryOps for LineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.coordinates.clone()
    }

    fn length(&self) -> f64 {
        mathlib::path_length(&self.coordinates)
    }

    fn centroid(&self) -> Option<Coordinate> {
        mathlib::path_centroid(&self.coordinates)
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    fn is_simple(&self) -> bool {
        !mathlib::has_self_intersection(&self.coordinates, self.is_closed())
    }

    fn is_valid(&self) -> bool {
        self.coordinates.is_empty()
            || (self.coordinates.len() >= 2 && self.coordinates.iter().all(Coordinate::is_finite))
    }

    fn to_wkt(&self) -> String {
        wkt::tagged("LINESTRING", wkt::coordinate_list(&self.coordinates))
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        for c in &mut self.coordinates {
            *c = self.factory.snap(f(*c));
        }
    }

    fn components(&self) -> Components<'_> {
        Components::single_path(&self.coordinates)
    }
}

/// Closed line string bounding an area. `is_simple` always answers true; the
/// self-intersection check lives in `is_valid`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing {
    pub(super) factory: GeometryFactory,
    pub(super) coordinates: Vec<Coordinate>,
}

impl LinearRing {
    pub fn coordinate_slice(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn is_closed(&self) -> bool {
        !self.coordinates.is_empty() && self.coordinates.first() == self.coordinates.last()
    }

    /// Shoelace sum; positive when the ring runs counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        mathlib::signed_area(&self.coordinates)
    }

    /// Points on the ring count as contained.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        mathlib::point_in_ring(coordinate, &self.coordinates)
    }

    pub(crate) fn into_coordinates(self) -> Vec<Coordinate> {
        self.coordinates
    }
}

impl GeometryOps for LinearRing {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LinearRing
    }

    fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.coordinates.clone()
    }

    fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    fn length(&self) -> f64 {
        mathlib::path_length(&self.coordinates)
    }

    fn centroid(&self) -> Option<Coordinate> {
        let area = self.signed_area();
        if area == 0.0 {
            return mathlib::path_centroid(&self.coordinates);
        }
        let (mut x, mut y) = (0.0, 0.0);
        for pair in self.coordinates.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let cross = a.x * b.y - b.x * a.y;
            x += (a.x + b.x) * cross;
            y += (a.y + b.y) * cross;
        }
        Some(Coordinate::new(x / (6.0 * area), y / (6.0 * area)))
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    fn is_simple(&self) -> bool {
        true
    }

    fn is_valid(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.is_closed()
            && self.coordinates.len() >= 4
            && !mathlib::has_self_intersection(&self.coordinates, true)
    }

    fn to_wkt(&self) -> String {
        wkt::tagged("LINEARRING", wkt::coordinate_list(&self.coordinates))
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        for c in &mut self.coordinates {
            *c = self.factory.snap(f(*c));
        }
        if let (Some(first), Some(last)) = (self.coordinates.first().copied(), self.coordinates.last_mut()) {
            *last = first;
        }
    }

    fn components(&self) -> Components<'_> {
        Components::single_path(&self.coordinates)
    }
}
