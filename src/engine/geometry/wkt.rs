use geozero::error::{GeozeroError, Result as GeozeroResult};
use geozero::wkt::Wkt;
use geozero::{GeomProcessor, GeozeroGeometry};

use crate::error::{GeoViewError, GeoViewResult};
use crate::model::Coordinate;

use super::{Geometry, GeometryFactory, LineString, LinearRing, Polygon};

pub(super) const EMPTY: &str = "EMPTY";

/// `"TAG (...)"`, or `"TAG EMPTY"` without a body.
pub(super) fn tagged(tag: &str, body: Option<String>) -> String {
    match body {
        Some(body) => format!("{tag} {body}"),
        None => format!("{tag} {EMPTY}"),
    }
}

/// `"(x y, x y, ...)"`, `None` for an empty sequence.
pub(super) fn coordinate_list(coordinates: &[Coordinate]) -> Option<String> {
    if coordinates.is_empty() {
        return None;
    }
    let parts: Vec<String> = coordinates.iter().map(Coordinate::to_string).collect();
    Some(format!("({})", parts.join(", ")))
}

/// Collects geozero's WKT events into our geometry types.
struct GeometryBuilder {
    factory: GeometryFactory,
    coordinates: Vec<Coordinate>,
    rings: Vec<LinearRing>,
    line_strings: Vec<LineString>,
    polygons: Vec<Polygon>,
    in_polygon: bool,
    ring_input: bool,
    result: Option<Geometry>,
}

impl GeometryBuilder {
    fn new(factory: GeometryFactory, ring_input: bool) -> Self {
        GeometryBuilder {
            factory,
            coordinates: Vec::new(),
            rings: Vec::new(),
            line_strings: Vec::new(),
            polygons: Vec::new(),
            in_polygon: false,
            ring_input,
            result: None,
        }
    }

    fn finish(&mut self, geometry: Geometry) -> GeozeroResult<()> {
        if self.result.is_some() {
            return Err(GeozeroError::Geometry("more than one geometry".to_string()));
        }
        self.result = Some(geometry);
        Ok(())
    }

    fn unsupported(kind: &str) -> GeozeroResult<()> {
        Err(GeozeroError::Geometry(format!("unsupported geometry type {kind}")))
    }
}

impl GeomProcessor for GeometryBuilder {
    fn xy(&mut self, x: f64, y: f64, _idx: usize) -> GeozeroResult<()> {
        self.coordinates.push(Coordinate::new(x, y));
        Ok(())
    }

    fn empty_point(&mut self, _idx: usize) -> GeozeroResult<()> {
        let point = self.factory.create_point(None);
        self.finish(point.into())
    }

    fn point_begin(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.coordinates.clear();
        Ok(())
    }

    fn point_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let coordinate = self.coordinates.first().copied();
        self.coordinates.clear();
        let point = self.factory.create_point(coordinate);
        self.finish(point.into())
    }

    fn multipoint_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        Self::unsupported("MULTIPOINT")
    }

    fn linestring_begin(&mut self, _tagged: bool, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.coordinates.clear();
        Ok(())
    }

    fn linestring_end(&mut self, tagged: bool, _idx: usize) -> GeozeroResult<()> {
        let coordinates = std::mem::take(&mut self.coordinates);
        if self.in_polygon {
            self.rings.push(self.factory.create_linear_ring(coordinates));
            Ok(())
        } else if !tagged {
            self.line_strings.push(self.factory.create_line_string(coordinates));
            Ok(())
        } else if self.ring_input {
            let ring = self.factory.create_linear_ring(coordinates);
            self.finish(ring.into())
        } else {
            let line = self.factory.create_line_string(coordinates);
            self.finish(line.into())
        }
    }

    fn multilinestring_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.line_strings.clear();
        Ok(())
    }

    fn multilinestring_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let lines = std::mem::take(&mut self.line_strings);
        let multi = self.factory.create_multi_line_string(lines);
        self.finish(multi.into())
    }

    fn polygon_begin(&mut self, _tagged: bool, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.in_polygon = true;
        self.rings.clear();
        Ok(())
    }

    fn polygon_end(&mut self, tagged: bool, _idx: usize) -> GeozeroResult<()> {
        self.in_polygon = false;
        let mut rings = std::mem::take(&mut self.rings).into_iter();
        let exterior = rings.next();
        let polygon = self.factory.create_polygon(exterior, rings.collect());
        if tagged {
            self.finish(polygon.into())
        } else {
            self.polygons.push(polygon);
            Ok(())
        }
    }

    fn multipolygon_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.polygons.clear();
        Ok(())
    }

    fn multipolygon_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let polygons = std::mem::take(&mut self.polygons);
        let multi = self.factory.create_multi_polygon(polygons);
        self.finish(multi.into())
    }

    fn geometrycollection_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        Self::unsupported("GEOMETRYCOLLECTION")
    }
}

const LINEARRING: &str = "LINEARRING";

impl GeometryFactory {
    /// Parses WKT into a geometry stamped by this factory. `LINEARRING` is accepted
    /// alongside the OGC types this crate models.
    pub fn parse_wkt(&self, text: &str) -> GeoViewResult<Geometry> {
        let trimmed = text.trim_start();
        let is_ring = trimmed
            .get(..LINEARRING.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LINEARRING));
        let source = if is_ring {
            format!("LINESTRING{}", &trimmed[LINEARRING.len()..])
        } else {
            trimmed.to_string()
        };

        let mut builder = GeometryBuilder::new(*self, is_ring);
        Wkt(source.as_str())
            .process_geom(&mut builder)
            .map_err(|e| GeoViewError::Wkt(e.to_string()))?;
        builder
            .result
            .ok_or_else(|| GeoViewError::Wkt(format!("no geometry found in '{text}'")))
    }
}
