use thiserror::Error;

pub type GeoViewResult<T> = Result<T, GeoViewError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoViewError {
    #[error("invalid resolutions: {0}")]
    InvalidResolutions(String),
    #[error("invalid tile size {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },
    #[error("WKT error: {0}")]
    Wkt(String),
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
}
