use geojson::{Position, Value as GeoValue};

use crate::error::{GeoViewError, GeoViewResult};
use crate::model::Coordinate;

use super::{Geometry, GeometryFactory, GeometryOps, LinearRing, Polygon};

fn to_coordinate(position: &Position) -> GeoViewResult<Coordinate> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coordinate::new(*x, *y)),
        _ => Err(GeoViewError::GeoJson(format!(
            "position needs at least 2 values, got {}",
            position.len()
        ))),
    }
}

fn to_coordinates(positions: &[Position]) -> GeoViewResult<Vec<Coordinate>> {
    positions.iter().map(to_coordinate).collect()
}

fn to_positions(coordinates: &[Coordinate]) -> Vec<Position> {
    coordinates.iter().map(|c| vec![c.x, c.y]).collect()
}

fn polygon_positions(polygon: &Polygon) -> Vec<Vec<Position>> {
    if polygon.is_empty() {
        return Vec::new();
    }
    std::iter::once(polygon.exterior_ring())
        .chain(polygon.interior_rings())
        .map(|ring| to_positions(ring.coordinate_slice()))
        .collect()
}

impl GeometryFactory {
    fn create_polygon_from_rings(&self, rings: &[Vec<Position>]) -> GeoViewResult<Polygon> {
        let mut rings = rings
            .iter()
            .map(|ring| Ok(self.create_linear_ring(to_coordinates(ring)?)))
            .collect::<GeoViewResult<Vec<LinearRing>>>()?
            .into_iter();
        let exterior = rings.next();
        Ok(self.create_polygon(exterior, rings.collect()))
    }

    /// Converts feature geometry supplied as GeoJSON.
    pub fn from_geojson(&self, geometry: &geojson::Geometry) -> GeoViewResult<Geometry> {
        let geometry = match &geometry.value {
            GeoValue::Point(position) => self.create_point(Some(to_coordinate(position)?)).into(),
            GeoValue::LineString(positions) => {
                self.create_line_string(to_coordinates(positions)?).into()
            }
            GeoValue::Polygon(rings) => self.create_polygon_from_rings(rings)?.into(),
            GeoValue::MultiLineString(lines) => {
                let lines = lines
                    .iter()
                    .map(|line| Ok(self.create_line_string(to_coordinates(line)?)))
                    .collect::<GeoViewResult<Vec<_>>>()?;
                self.create_multi_line_string(lines).into()
            }
            GeoValue::MultiPolygon(polygons) => {
                let polygons = polygons
                    .iter()
                    .map(|rings| self.create_polygon_from_rings(rings))
                    .collect::<GeoViewResult<Vec<_>>>()?;
                self.create_multi_polygon(polygons).into()
            }
            GeoValue::MultiPoint(_) => {
                return Err(GeoViewError::UnsupportedGeometry("MultiPoint".to_string()));
            }
            GeoValue::GeometryCollection(_) => {
                return Err(GeoViewError::UnsupportedGeometry("GeometryCollection".to_string()));
            }
        };
        Ok(geometry)
    }
}

/// GeoJSON has no empty point and no ring type: empty points fail, rings become
/// line strings.
impl TryFrom<&Geometry> for GeoValue {
    type Error = GeoViewError;

    fn try_from(geometry: &Geometry) -> GeoViewResult<Self> {
        let value = match geometry {
            Geometry::Point(point) => match point.coordinate() {
                Some(c) => GeoValue::Point(vec![c.x, c.y]),
                None => {
                    return Err(GeoViewError::GeoJson("empty point has no GeoJSON form".to_string()));
                }
            },
            Geometry::LineString(line) => GeoValue::LineString(to_positions(line.coordinate_slice())),
            Geometry::LinearRing(ring) => GeoValue::LineString(to_positions(ring.coordinate_slice())),
            Geometry::Polygon(polygon) => GeoValue::Polygon(polygon_positions(polygon)),
            Geometry::MultiLineString(multi) => GeoValue::MultiLineString(
                multi
                    .line_strings()
                    .iter()
                    .map(|line| to_positions(line.coordinate_slice()))
                    .collect(),
            ),
            Geometry::MultiPolygon(multi) => {
                GeoValue::MultiPolygon(multi.polygons().iter().map(polygon_positions).collect())
            }
        };
        Ok(value)
    }
}
