use crate::model::Coordinate;

use super::{relate, wkt, Components, GeometryFactory, GeometryOps, GeometryType, LinearRing};

/// One exterior ring and zero or more holes. Empty when the exterior ring is.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub(super) factory: GeometryFactory,
    pub(super) exterior: LinearRing,
    pub(super) interiors: Vec<LinearRing>,
}

impl Polygon {
    pub fn exterior_ring(&self) -> &LinearRing {
        &self.exterior
    }

    pub fn interior_rings(&self) -> &[LinearRing] {
        &self.interiors
    }

    pub fn num_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    /// Boundary points count as contained; points strictly inside a hole do not.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        if self.is_empty() || !self.exterior.contains(coordinate) {
            return false;
        }
        !self.interiors.iter().any(|hole| {
            hole.contains(coordinate) && relate::distance_to_path(coordinate, hole.coordinate_slice()) > 0.0
        })
    }

    fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Ring list body without the POLYGON tag, `None` when empty.
    pub(super) fn wkt_body(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let rings: Vec<String> = self
            .rings()
            .map(|ring| wkt::coordinate_list(ring.coordinate_slice()).unwrap_or_else(|| wkt::EMPTY.to_string()))
            .collect();
        Some(format!("({})", rings.join(", ")))
    }
}

impl GeometryOps for Polygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        if self.is_empty() {
            return Vec::new();
        }
        self.rings().flat_map(|ring| ring.coordinate_slice().iter().copied()).collect()
    }

    fn area(&self) -> f64 {
        self.exterior.area() - self.interiors.iter().map(GeometryOps::area).sum::<f64>()
    }

    fn length(&self) -> f64 {
        self.rings().map(GeometryOps::length).sum()
    }

    /// Exterior centroid with the holes' centroids subtracted by area.
    fn centroid(&self) -> Option<Coordinate> {
        let exterior = self.exterior.centroid()?;
        let mut total = self.exterior.area();
        let mut x = exterior.x * total;
        let mut y = exterior.y * total;
        for hole in &self.interiors {
            if let Some(c) = hole.centroid() {
                let area = hole.area();
                x -= c.x * area;
                y -= c.y * area;
                total -= area;
            }
        }
        if total == 0.0 {
            return Some(exterior);
        }
        Some(Coordinate::new(x / total, y / total))
    }

    fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    fn is_simple(&self) -> bool {
        let rings: Vec<&LinearRing> = self.rings().filter(|r| !r.is_empty()).collect();
        rings.iter().enumerate().all(|(i, a)| {
            rings[i + 1..]
                .iter()
                .all(|b| !relate::intersects(&a.components(), &b.components()))
        })
    }

    /// Every ring valid and no two rings crossing each other.
    fn is_valid(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.rings().all(GeometryOps::is_valid) && self.is_simple()
    }

    fn to_wkt(&self) -> String {
        wkt::tagged("POLYGON", self.wkt_body())
    }

    fn transform_coordinates(&mut self, f: &mut dyn FnMut(Coordinate) -> Coordinate) {
        self.exterior.transform_coordinates(f);
        for hole in &mut self.interiors {
            hole.transform_coordinates(f);
        }
    }

    fn components(&self) -> Components<'_> {
        if self.is_empty() {
            return Components::default();
        }
        Components {
            paths: self
                .rings()
                .filter(|r| !r.is_empty())
                .map(LinearRing::coordinate_slice)
                .collect(),
            polygons: vec![self],
        }
    }
}
