//! Client-side map model: geometries, viewport state and tile grids.

pub mod engine;
pub mod error;
pub mod model;
pub mod view;

pub use engine::{
    Geometry, GeometryFactory, GeometryOps, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPolygon, Point, Polygon, RasterTile, TileCode, TileService, TileServiceConfig,
    TileServiceState,
};
pub use error::{GeoViewError, GeoViewResult};
pub use model::{Bbox, Coordinate};
pub use view::{BoundsLimitOption, MapView, MapViewChangedEvent, MapViewConfig, ZoomOption};

/// Installs a formatting subscriber. Does nothing if one is already set.
pub fn init_tracing(level: tracing::Level) {
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
fn start() {
    init_tracing(tracing::Level::INFO);
    tracing::info!("geoview loaded");
}
