use crate::error::{GeoViewError, GeoViewResult};
use crate::model::{Bbox, Coordinate};

/// Index of the level closest to `resolution` within `resolutions[min..=max]`,
/// which must be sorted strictly decreasing.
///
/// Inside a bracketing pair `upper >= resolution >= lower` the finer level is
/// chosen only when `upper - resolution > 2 * (resolution - lower)`; otherwise
/// the coarser one. Requests beyond either end snap to that end.
pub(crate) fn closest_level(resolutions: &[f64], min: usize, max: usize, resolution: f64) -> usize {
    if resolution >= resolutions[min] {
        return min;
    }
    if resolution <= resolutions[max] {
        return max;
    }
    for i in min..max {
        let upper = resolutions[i];
        let lower = resolutions[i + 1];
        if resolution <= upper && resolution >= lower {
            return if upper - resolution > 2.0 * (resolution - lower) { i + 1 } else { i };
        }
    }
    unreachable!("resolution {resolution} has no bracket in {resolutions:?}, list is not sorted");
}

/// Finest level in `resolutions[min..=max]` that is not finer than `resolution`.
pub(crate) fn fit_level(resolutions: &[f64], min: usize, max: usize, resolution: f64) -> usize {
    (min..=max)
        .rev()
        .find(|&i| resolutions[i] >= resolution)
        .unwrap_or(min)
}

/// Raster layer settings a tile service is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct TileServiceConfig {
    pub resolutions: Vec<f64>,
    pub max_bounds: Bbox,
    pub tile_width: u32,
    pub tile_height: u32,
    pub crs: String,
}

impl Default for TileServiceConfig {
    fn default() -> Self {
        TileServiceConfig {
            resolutions: Vec::new(),
            max_bounds: Bbox::default(),
            tile_width: 256,
            tile_height: 256,
            crs: "EPSG:4326".to_string(),
        }
    }
}

impl TileServiceConfig {
    pub fn with_resolutions(mut self, resolutions: Vec<f64>) -> Self {
        self.resolutions = resolutions;
        self
    }

    pub fn with_max_bounds(mut self, max_bounds: Bbox) -> Self {
        self.max_bounds = max_bounds;
        self
    }

    pub fn with_tile_size(mut self, tile_width: u32, tile_height: u32) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = crs.into();
        self
    }
}

/// Validated, immutable per-layer tile configuration. Resolutions are sorted
/// strictly decreasing, so level 0 is the coarsest.
#[derive(Clone, Debug, PartialEq)]
pub struct TileServiceState {
    resolutions: Vec<f64>,
    max_bounds: Bbox,
    tile_width: u32,
    tile_height: u32,
    crs: String,
}

impl TileServiceState {
    pub fn new(config: TileServiceConfig) -> GeoViewResult<Self> {
        let TileServiceConfig {
            mut resolutions,
            max_bounds,
            tile_width,
            tile_height,
            crs,
        } = config;

        if tile_width == 0 || tile_height == 0 {
            return Err(GeoViewError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        if resolutions.is_empty() {
            return Err(GeoViewError::InvalidResolutions("no resolutions configured".to_string()));
        }
        if let Some(bad) = resolutions.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
            return Err(GeoViewError::InvalidResolutions(format!(
                "{bad} is not a positive resolution"
            )));
        }
        resolutions.sort_by(|a, b| b.total_cmp(a));
        resolutions.dedup();

        tracing::info!(
            crs = %crs,
            levels = resolutions.len(),
            tile_width,
            tile_height,
            "tile service state created"
        );
        Ok(TileServiceState {
            resolutions,
            max_bounds,
            tile_width,
            tile_height,
            crs,
        })
    }

    pub fn resolutions(&self) -> &[f64] {
        &self.resolutions
    }

    pub fn max_bounds(&self) -> &Bbox {
        &self.max_bounds
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn crs(&self) -> &str {
        &self.crs
    }
}

/// Address of a tile in the pyramid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCode {
    pub level: usize,
    pub x: u32,
    pub y: u32,
}

impl TileCode {
    pub fn new(level: usize, x: u32, y: u32) -> Self {
        TileCode { level, x, y }
    }
}

/// Tile to fetch: its world extent and the pixel box it is drawn into.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterTile {
    pub code: TileCode,
    pub world_bounds: Bbox,
    pub screen_bounds: Bbox,
}

/// TMS tile grid computations over a [`TileServiceState`].
#[derive(Clone, Debug)]
pub struct TileService {
    state: TileServiceState,
}

impl TileService {
    pub fn new(state: TileServiceState) -> Self {
        TileService { state }
    }

    pub fn state(&self) -> &TileServiceState {
        &self.state
    }

    fn last_level(&self) -> usize {
        self.state.resolutions.len() - 1
    }

    /// Level whose resolution best matches `resolution` (world units per pixel).
    /// NaN maps to the finest level.
    pub fn tile_level(&self, resolution: f64) -> usize {
        if resolution.is_nan() {
            tracing::warn!("tile level requested for NaN resolution, using finest level");
            return self.last_level();
        }
        closest_level(&self.state.resolutions, 0, self.last_level(), resolution)
    }

    /// Resolution of `level`, clamped to the finest level.
    pub fn resolution(&self, level: usize) -> f64 {
        self.state.resolutions[level.min(self.last_level())]
    }

    /// Tile width in world units at `level`.
    pub fn tile_width(&self, level: usize) -> f64 {
        f64::from(self.state.tile_width) * self.resolution(level)
    }

    /// Tile height in world units at `level`.
    pub fn tile_height(&self, level: usize) -> f64 {
        f64::from(self.state.tile_height) * self.resolution(level)
    }

    fn tile_corners(&self, code: &TileCode) -> (Coordinate, Coordinate) {
        let width = self.tile_width(code.level);
        let height = self.tile_height(code.level);
        let origin = self.state.max_bounds.origin();
        let x = f64::from(code.x);
        let y = f64::from(code.y);
        (
            Coordinate::new(origin.x + x * width, origin.y + y * height),
            Coordinate::new(origin.x + (x + 1.0) * width, origin.y + (y + 1.0) * height),
        )
    }

    /// World extent of a tile, measured from the max bounds origin.
    pub fn tile_bounds(&self, code: &TileCode) -> Bbox {
        let (min, max) = self.tile_corners(code);
        Bbox::from_corners(min, max)
    }

    /// Every tile covering `bounds` at the level matching `scale` (pixels per
    /// world unit). Bounds outside the max bounds yield no tiles.
    pub fn tiles_for_bounds(&self, bounds: &Bbox, scale: f64) -> Vec<RasterTile> {
        if !(scale.is_finite() && scale > 0.0) {
            tracing::warn!(scale, "ignoring tile request for invalid scale");
            return Vec::new();
        }
        let Some(clipped) = bounds.intersection(&self.state.max_bounds) else {
            return Vec::new();
        };

        let level = self.tile_level(1.0 / scale);
        let width = self.tile_width(level);
        let height = self.tile_height(level);
        let origin = self.state.max_bounds.origin();

        let x_min = ((clipped.x() - origin.x) / width).floor().max(0.0) as u32;
        let x_max = ((clipped.max_x() - origin.x) / width).ceil().max(0.0) as u32;
        let y_min = ((clipped.y() - origin.y) / height).floor().max(0.0) as u32;
        let y_max = ((clipped.max_y() - origin.y) / height).ceil().max(0.0) as u32;

        let tiles: Vec<RasterTile> = (x_min..x_max)
            .flat_map(|x| (y_min..y_max).map(move |y| TileCode::new(level, x, y)))
            .map(|code| {
                let (min, max) = self.tile_corners(&code);
                RasterTile {
                    code,
                    world_bounds: Bbox::from_corners(min, max),
                    screen_bounds: screen_bounds(min, max, scale),
                }
            })
            .collect();

        tracing::trace!(level, count = tiles.len(), "enumerated tiles");
        tiles
    }
}

/// Rounds each edge independently so neighbouring tiles share pixel edges.
fn screen_bounds(min: Coordinate, max: Coordinate, scale: f64) -> Bbox {
    let x = (scale * min.x).round();
    let y = (scale * min.y).round();
    let max_x = (scale * max.x).round();
    let max_y = (scale * max.y).round();
    Bbox::new(x, y, max_x - x, max_y - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TileService {
        let config = TileServiceConfig::default()
            .with_resolutions(vec![0.5, 100.0, 2.5, 10.0, 1.0])
            .with_max_bounds(Bbox::new(0.0, 0.0, 1000.0, 400.0))
            .with_tile_size(100, 100)
            .with_crs("EPSG:900913");
        TileService::new(TileServiceState::new(config).unwrap())
    }

    #[test]
    fn test_resolutions_are_sorted_descending() {
        assert_eq!(service().state().resolutions(), &[100.0, 10.0, 2.5, 1.0, 0.5]);
    }

    #[test]
    fn test_invalid_config() {
        let empty = TileServiceState::new(TileServiceConfig::default());
        assert!(matches!(empty, Err(GeoViewError::InvalidResolutions(_))));

        let negative = TileServiceState::new(TileServiceConfig::default().with_resolutions(vec![1.0, -2.0]));
        assert!(matches!(negative, Err(GeoViewError::InvalidResolutions(_))));

        let no_size = TileServiceState::new(
            TileServiceConfig::default()
                .with_resolutions(vec![1.0])
                .with_tile_size(0, 256),
        );
        assert_eq!(no_size, Err(GeoViewError::InvalidTileSize { width: 0, height: 256 }));
    }

    #[test]
    fn test_tile_level_ends() {
        let service = service();
        assert_eq!(service.tile_level(100.0), 0);
        assert_eq!(service.tile_level(500.0), 0);
        assert_eq!(service.tile_level(0.5), 4);
        assert_eq!(service.tile_level(0.01), 4);
    }

    #[test]
    fn test_tile_level_nan_uses_finest_level() {
        let service = service();
        assert_eq!(service.tile_level(f64::NAN), 4);
        assert_eq!(service.tile_level(f64::INFINITY), 0);
    }

    #[test]
    fn test_tile_level_tie_break() {
        let service = service();
        // Midway between 2.5 and 1: 0.75 is not more than 2 * 0.75, coarser wins.
        assert_eq!(service.tile_level(1.75), 2);
        // 2.0 lies within the coarse half.
        assert_eq!(service.tile_level(2.0), 2);
        // 1.4: 1.1 > 2 * 0.4, finer wins.
        assert_eq!(service.tile_level(1.4), 3);
        assert_eq!(service.tile_level(10.0), 1);
    }

    #[test]
    fn test_tile_size_in_world_units() {
        let service = service();
        assert_eq!(service.tile_width(0), 10000.0);
        assert_eq!(service.tile_height(2), 250.0);
        assert_eq!(service.tile_width(99), 50.0);
    }

    #[test]
    fn test_tiles_for_bounds() {
        let service = service();
        // Scale 0.4 is resolution 2.5: tiles of 250 world units.
        let tiles = service.tiles_for_bounds(&Bbox::new(300.0, 100.0, 400.0, 200.0), 0.4);
        let codes: Vec<(u32, u32)> = tiles.iter().map(|t| (t.code.x, t.code.y)).collect();
        assert_eq!(codes, vec![(1, 0), (1, 1), (2, 0), (2, 1)]);
        assert!(tiles.iter().all(|t| t.code.level == 2));
        assert_eq!(tiles[0].world_bounds, Bbox::new(250.0, 0.0, 250.0, 250.0));
        assert_eq!(tiles[0].screen_bounds, Bbox::new(100.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_tiles_are_clipped_to_max_bounds() {
        let service = service();
        let tiles = service.tiles_for_bounds(&Bbox::new(-500.0, -500.0, 600.0, 600.0), 0.1);
        // Resolution 10: tiles of 1000 world units, only the first one overlaps.
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].code, TileCode::new(1, 0, 0));

        assert!(service
            .tiles_for_bounds(&Bbox::new(2000.0, 2000.0, 10.0, 10.0), 1.0)
            .is_empty());
        assert!(service.tiles_for_bounds(&Bbox::new(0.0, 0.0, 10.0, 10.0), 0.0).is_empty());
    }

    #[test]
    fn test_adjacent_tiles_share_pixel_edges() {
        let service = service();
        let scale = 1.0 / 2.5 + 0.0123;
        let tiles = service.tiles_for_bounds(&Bbox::new(0.0, 0.0, 1000.0, 400.0), scale);
        for tile in &tiles {
            let right = TileCode::new(tile.code.level, tile.code.x + 1, tile.code.y);
            if let Some(neighbour) = tiles.iter().find(|t| t.code == right) {
                assert_eq!(tile.screen_bounds.max_x(), neighbour.screen_bounds.x());
            }
        }
        assert!(tiles.len() > 1);
    }
}
