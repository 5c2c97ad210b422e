use crate::engine::mathlib;
use crate::model::{union_bounds, Bbox, Coordinate};

use super::{relate, wkt, Components, GeometryFactory, GeometryOps, GeometryType, LineString, Polygon};

/// Pairwise O(n²) check that no two children intersect.
fn children_disjoint<T: GeometryOps>(children: &[T]) -> bool {
    children.iter().enumerate().all(|(i, a)| {
        children[i + 1..]
            .iter()
            .all(|b| !relate::intersects(&a.components(), &b.components()))
    })
}

/// Length-weighted centroid of the path running through each child's centroid.
/// Only locally accurate: this is not the centroid of the combined geometry.
fn centroid_of_centroids<T: GeometryOps>(children: &[T]) -> Option<Coordinate> {
    let centroids: Vec<Coordinate> = children.iter().filter_map(GeometryOps::centroid).collect();
    mathlib::path_centroid(&centroids)
}

fn children_bounds<T: GeometryOps>(children: &[T]) -> Option<Bbox> {
    children.iter().map(GeometryOps::bounds).fold(None, union_bounds)
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiLineString {
    pub(super) factory: GeometryFactory,
    pub(super) line_strings: Vec<LineString>,
}

impl MultiLineString {
    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }
}

impl GeometryOps for MultiLineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.line_strings.iter().flat_map(GeometryOps::coordinates).collect()
    }

    fn bounds(&self) -> Option<Bbox> {
        children_bounds(&self.line_strings)
    }

    fn length(&self) -> f64 {
        self.line_strings.iter().map(GeometryOps::length).sum()
    }

    fn centroid(&self) -> Option<Coordinate> {
        centroid_of_centroids(&self.line_strings)
    }

    fn is_empty(&self) -> bool {
        self.line_strings.is_empty()
    }

    fn is_simple(&self) -> bool {
        children_disjoint(&self.line_strings)
    }

    fn is_valid(&self) -> bool {
        self.line_strings.iter().all(GeometryOps::is_valid)
    }

    fn num_geometries(&self) -> usize {
        self.line_strings.len()
    }

    fn to_wkt(&self) -> String {
        let body = (!self.is_empty()).then(|| {
            let lines: Vec<String> = self
                .line_strings
                .iter()
                .map(|line| wkt::coordinate_list(line.coordinate_slice()).unwrap_or_else(|| wkt::EMPTY.to_string()))
                .collect();
            format!("({})", lines.join(", "))
        });
        wkt::tagged("MULTILINESTRING", body)
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        for line in &mut self.line_strings {
            line.transform_coordinates(f);
        }
    }

    fn components(&self) -> Components<'_> {
        Components::merge(self.line_strings.iter().map(GeometryOps::components))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiPolygon {
    pub(super) factory: GeometryFactory,
    pub(super) polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl GeometryOps for MultiPolygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.polygons.iter().flat_map(GeometryOps::coordinates).collect()
    }

    fn bounds(&self) -> Option<Bbox> {
        children_bounds(&self.polygons)
    }

    fn area(&self) -> f64 {
        self.polygons.iter().map(GeometryOps::area).sum()
    }

    fn length(&self) -> f64 {
        self.polygons.iter().map(GeometryOps::length).sum()
    }

    fn centroid(&self) -> Option<Coordinate> {
        centroid_of_centroids(&self.polygons)
    }

    fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    fn is_simple(&self) -> bool {
        children_disjoint(&self.polygons)
    }

    fn is_valid(&self) -> bool {
        self.polygons.iter().all(GeometryOps::is_valid) && children_disjoint(&self.polygons)
    }

    fn num_geometries(&self) -> usize {
        self.polygons.len()
    }

    fn to_wkt(&self) -> String {
        let body = (!self.is_empty()).then(|| {
            let polygons: Vec<String> = self
                .polygons
                .iter()
                .map(|polygon| polygon.wkt_body().unwrap_or_else(|| wkt::EMPTY.to_string()))
                .collect();
            format!("({})", polygons.join(", "))
        });
        wkt::tagged("MULTIPOLYGON", body)
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        for polygon in &mut self.polygons {
            polygon.transform_coordinates(f);
        }
    }

    fn components(&self) -> Components<'_> {
        Components::merge(self.polygons.iter().map(GeometryOps::components))
    }
}
