pub mod geometry;
pub mod mathlib;
pub mod tiles;
pub mod transforms;

pub use geometry::{
    Geometry, GeometryFactory, GeometryOps, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPolygon, Point, Polygon,
};
pub use tiles::{RasterTile, TileCode, TileService, TileServiceConfig, TileServiceState};
