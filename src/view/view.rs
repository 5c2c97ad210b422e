use std::fmt;
use std::str::FromStr;

use crate::engine::tiles::{closest_level, fit_level};
use crate::engine::transforms;
use crate::error::GeoViewError;
use crate::model::{Bbox, Coordinate};

/// How a requested scale is snapped onto the configured resolutions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoomOption {
    /// No snapping, the scale is only clamped.
    Exact,
    /// Nearest level that does not zoom in further than requested.
    LevelFit,
    /// Closest level, but always a different one than the current level when
    /// the requested scale differs from the current scale.
    LevelChange,
    /// Closest level by the weighted bracket rule.
    #[default]
    LevelClosest,
}

impl FromStr for ZoomOption {
    type Err = GeoViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(ZoomOption::Exact),
            "level_fit" => Ok(ZoomOption::LevelFit),
            "level_change" => Ok(ZoomOption::LevelChange),
            "level_closest" => Ok(ZoomOption::LevelClosest),
            _ => Err(GeoViewError::UnknownOption(s.to_string())),
        }
    }
}

/// How the view is kept against the maximum bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundsLimitOption {
    /// The whole view rectangle stays inside the max bounds.
    #[default]
    CompletelyWithinMaxBounds,
    /// Only the view center stays inside the max bounds.
    CenterWithinMaxBounds,
}

impl FromStr for BoundsLimitOption {
    type Err = GeoViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "completely_within_max_bounds" => Ok(BoundsLimitOption::CompletelyWithinMaxBounds),
            "center_within_max_bounds" => Ok(BoundsLimitOption::CenterWithinMaxBounds),
            _ => Err(GeoViewError::UnknownOption(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapViewConfig {
    pub max_bounds: Option<Bbox>,
    /// World units per pixel, any order.
    pub resolutions: Vec<f64>,
    pub maximum_scale: f64,
    pub bounds_limit_option: BoundsLimitOption,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        MapViewConfig {
            max_bounds: None,
            resolutions: Vec::new(),
            maximum_scale: 10.0,
            bounds_limit_option: BoundsLimitOption::default(),
        }
    }
}

impl MapViewConfig {
    pub fn with_max_bounds(mut self, max_bounds: Bbox) -> Self {
        self.max_bounds = Some(max_bounds);
        self
    }

    pub fn with_resolutions(mut self, resolutions: Vec<f64>) -> Self {
        self.resolutions = resolutions;
        self
    }

    pub fn with_maximum_scale(mut self, maximum_scale: f64) -> Self {
        self.maximum_scale = maximum_scale;
        self
    }

    pub fn with_bounds_limit_option(mut self, option: BoundsLimitOption) -> Self {
        self.bounds_limit_option = option;
        self
    }
}

/// Emitted once per mutation that moved the bounds or changed the scale.
#[derive(Clone, Debug, PartialEq)]
pub struct MapViewChangedEvent {
    pub bounds: Bbox,
    pub scale: f64,
    /// Same scale and same extent, only translated.
    pub is_panning: bool,
    /// Resolution level unchanged, or the scale unchanged when no resolutions
    /// are configured.
    pub is_same_scale_level: bool,
    pub is_map_resized: bool,
    pub zoom_option: Option<ZoomOption>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerRegistration(u64);

type ChangedHandler = Box<dyn FnMut(&MapViewChangedEvent)>;

#[derive(Clone, Copy)]
struct Snapshot {
    bounds: Bbox,
    scale: f64,
    level: Option<usize>,
}

/// Viewport over world space for a pixel display area.
///
/// Every mutation leaves the view legal: the scale lies within the minimum and
/// maximum scale and sits on a configured resolution when there are any, and the
/// bounds obey the bounds-limit option. Mutations return whether the view changed;
/// handlers are notified only in that case.
pub struct MapView {
    center: Coordinate,
    scale: f64,
    width: u32,
    height: u32,
    max_bounds: Option<Bbox>,
    maximum_scale: f64,
    resolutions: Vec<f64>,
    bounds_limit_option: BoundsLimitOption,
    handlers: Vec<(HandlerRegistration, ChangedHandler)>,
    next_handler: u64,
}

impl Default for MapView {
    fn default() -> Self {
        MapView::with_config(MapViewConfig::default())
    }
}

impl fmt::Debug for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapView")
            .field("center", &self.center)
            .field("scale", &self.scale)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("max_bounds", &self.max_bounds)
            .field("maximum_scale", &self.maximum_scale)
            .field("resolutions", &self.resolutions)
            .field("bounds_limit_option", &self.bounds_limit_option)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl MapView {
    pub fn with_config(config: MapViewConfig) -> Self {
        let mut view = MapView {
            center: Coordinate::default(),
            scale: 1.0,
            width: 0,
            height: 0,
            max_bounds: config.max_bounds,
            maximum_scale: config.maximum_scale,
            resolutions: sorted_resolutions(config.resolutions),
            bounds_limit_option: config.bounds_limit_option,
            handlers: Vec::new(),
            next_handler: 0,
        };
        view.revalidate();
        view
    }

    // ----- handlers -----

    pub fn add_map_view_changed_handler(
        &mut self,
        handler: impl FnMut(&MapViewChangedEvent) + 'static,
    ) -> HandlerRegistration {
        let registration = HandlerRegistration(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((registration, Box::new(handler)));
        registration
    }

    pub fn remove_handler(&mut self, registration: HandlerRegistration) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(r, _)| *r != registration);
        self.handlers.len() != before
    }

    // ----- getters -----

    pub fn current_scale(&self) -> f64 {
        self.scale
    }

    pub fn center_position(&self) -> Coordinate {
        self.center
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_bounds(&self) -> Option<Bbox> {
        self.max_bounds
    }

    pub fn maximum_scale(&self) -> f64 {
        self.maximum_scale
    }

    /// Sorted strictly decreasing.
    pub fn resolutions(&self) -> &[f64] {
        &self.resolutions
    }

    pub fn view_bounds_limit_option(&self) -> BoundsLimitOption {
        self.bounds_limit_option
    }

    pub fn bounds(&self) -> Bbox {
        transforms::view_bounds(self.center, f64::from(self.width), f64::from(self.height), self.scale)
    }

    /// Level of the current scale, `None` without resolutions.
    pub fn resolution_index(&self) -> Option<usize> {
        let last = self.resolutions.len().checked_sub(1)?;
        Some(closest_level(&self.resolutions, 0, last, 1.0 / self.scale))
    }

    /// Smallest scale allowed by the max bounds: the whole view fits inside them
    /// for `CompletelyWithinMaxBounds`, they fit inside the view for
    /// `CenterWithinMaxBounds`.
    pub fn minimum_scale(&self) -> f64 {
        let Some(max_bounds) = self.max_bounds else {
            return 0.0;
        };
        let ratio = |pixels: u32, extent: f64| (extent > 0.0).then(|| f64::from(pixels) / extent);
        let ratios = [
            ratio(self.width, max_bounds.width()),
            ratio(self.height, max_bounds.height()),
        ];
        let defined = ratios.into_iter().flatten();
        match self.bounds_limit_option {
            BoundsLimitOption::CompletelyWithinMaxBounds => defined.fold(0.0, f64::max),
            BoundsLimitOption::CenterWithinMaxBounds => defined.reduce(f64::min).unwrap_or(0.0),
        }
    }

    pub fn world_to_view(&self, world: &Coordinate) -> Coordinate {
        transforms::world_to_screen(world, &self.bounds(), self.scale)
    }

    pub fn view_to_world(&self, view: &Coordinate) -> Coordinate {
        transforms::screen_to_world(view, &self.bounds(), self.scale)
    }

    // ----- configuration -----

    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        self.mutate(true, None, |view| {
            view.width = width;
            view.height = height;
            if view.scale < view.minimum_scale() {
                view.scale = view.snap_scale(view.scale, ZoomOption::LevelFit);
            }
            view.center = view.clamp_center(view.center);
        })
    }

    pub fn set_max_bounds(&mut self, max_bounds: Option<Bbox>) -> bool {
        self.mutate(false, None, |view| {
            view.max_bounds = max_bounds;
            view.revalidate();
        })
    }

    pub fn set_maximum_scale(&mut self, maximum_scale: f64) -> bool {
        if !is_valid_scale(maximum_scale) {
            tracing::warn!(maximum_scale, "ignoring invalid maximum scale");
            return false;
        }
        self.mutate(false, None, |view| {
            view.maximum_scale = maximum_scale;
            view.revalidate();
        })
    }

    pub fn set_resolutions(&mut self, resolutions: Vec<f64>) -> bool {
        self.mutate(false, None, |view| {
            view.resolutions = sorted_resolutions(resolutions);
            view.revalidate();
        })
    }

    pub fn set_view_bounds_limit_option(&mut self, option: BoundsLimitOption) -> bool {
        self.mutate(false, None, |view| {
            view.bounds_limit_option = option;
            view.revalidate();
        })
    }

    // ----- navigation -----

    pub fn set_center_position(&mut self, center: Coordinate) -> bool {
        if !center.is_finite() {
            tracing::warn!(?center, "ignoring non-finite center");
            return false;
        }
        self.mutate(false, None, |view| view.center = view.clamp_center(center))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        self.set_center_position(self.center.translated(dx, dy))
    }

    pub fn set_current_scale(&mut self, scale: f64, option: ZoomOption) -> bool {
        self.set_current_scale_at(scale, option, self.center)
    }

    /// Zooms so that `rescale_point` keeps its position on screen.
    pub fn set_current_scale_at(&mut self, scale: f64, option: ZoomOption, rescale_point: Coordinate) -> bool {
        if !is_valid_scale(scale) || !rescale_point.is_finite() {
            tracing::warn!(scale, ?rescale_point, "ignoring invalid scale request");
            return false;
        }
        self.mutate(false, Some(option), |view| {
            let old_scale = view.scale;
            view.scale = view.snap_scale(scale, option);
            let center = transforms::rescale_center(view.center, rescale_point, old_scale, view.scale);
            view.center = view.clamp_center(center);
        })
    }

    pub fn scale(&mut self, factor: f64, option: ZoomOption) -> bool {
        self.set_current_scale(self.scale * factor, option)
    }

    pub fn scale_at(&mut self, factor: f64, option: ZoomOption, rescale_point: Coordinate) -> bool {
        self.set_current_scale_at(self.scale * factor, option, rescale_point)
    }

    /// Fits `bounds` into the display and centers on it. Degenerate bounds zoom
    /// to the maximum scale.
    pub fn apply_bounds(&mut self, bounds: &Bbox, option: ZoomOption) -> bool {
        let scale = transforms::fit_scale(bounds, f64::from(self.width), f64::from(self.height))
            .filter(|s| is_valid_scale(*s))
            .unwrap_or(self.maximum_scale);
        self.mutate(false, Some(option), |view| {
            view.scale = view.snap_scale(scale, option);
            view.center = view.clamp_center(bounds.center());
        })
    }

    // ----- internals -----

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            bounds: self.bounds(),
            scale: self.scale,
            level: self.resolution_index(),
        }
    }

    fn mutate(&mut self, resized: bool, option: Option<ZoomOption>, change: impl FnOnce(&mut Self)) -> bool {
        let before = self.snapshot();
        change(self);
        let bounds = self.bounds();
        if bounds == before.bounds && self.scale == before.scale {
            tracing::trace!(%bounds, "view unchanged, no event");
            return false;
        }

        let is_same_scale_level = match (before.level, self.resolution_index()) {
            (Some(a), Some(b)) => a == b,
            _ => before.scale == self.scale,
        };
        let event = MapViewChangedEvent {
            bounds,
            scale: self.scale,
            is_panning: before.scale == self.scale
                && bounds.width() == before.bounds.width()
                && bounds.height() == before.bounds.height(),
            is_same_scale_level,
            is_map_resized: resized,
            zoom_option: option,
        };
        tracing::debug!(
            %bounds,
            scale = self.scale,
            panning = event.is_panning,
            same_level = event.is_same_scale_level,
            "map view changed"
        );
        for (_, handler) in &mut self.handlers {
            handler(&event);
        }
        true
    }

    /// Re-establishes scale and center after a configuration change.
    fn revalidate(&mut self) {
        let option = if self.resolutions.is_empty() {
            ZoomOption::Exact
        } else {
            ZoomOption::LevelClosest
        };
        self.scale = self.snap_scale(self.scale, option);
        self.center = self.clamp_center(self.center);
    }

    fn limit_scale(&self, scale: f64) -> f64 {
        let minimum = self.minimum_scale();
        if scale < minimum {
            minimum
        } else if scale > self.maximum_scale {
            self.maximum_scale
        } else {
            scale
        }
    }

    /// Range of resolution indices whose scales respect the scale limits.
    fn level_range(&self) -> Option<(usize, usize)> {
        const TOLERANCE: f64 = 1e-10;
        let minimum = self.minimum_scale();
        let min = self
            .resolutions
            .iter()
            .position(|r| 1.0 / r >= minimum - TOLERANCE)?;
        let max = self
            .resolutions
            .iter()
            .rposition(|r| 1.0 / r <= self.maximum_scale + TOLERANCE)?;
        (min <= max).then_some((min, max))
    }

    fn snap_scale(&self, requested: f64, option: ZoomOption) -> f64 {
        let allowed = self.limit_scale(requested);
        if !is_valid_scale(allowed) {
            return self.scale;
        }
        let Some((min, max)) = self.level_range() else {
            return allowed;
        };
        let resolution = 1.0 / allowed;
        let mut level = match option {
            ZoomOption::Exact => return allowed,
            ZoomOption::LevelFit => fit_level(&self.resolutions, min, max, resolution),
            ZoomOption::LevelChange | ZoomOption::LevelClosest => {
                closest_level(&self.resolutions, min, max, resolution)
            }
        };
        if option == ZoomOption::LevelChange && self.resolution_index() == Some(level) {
            if requested > self.scale && level < max {
                level += 1;
            } else if requested < self.scale && level > min {
                level -= 1;
            }
        }
        1.0 / self.resolutions[level]
    }

    fn clamp_center(&self, center: Coordinate) -> Coordinate {
        let Some(max_bounds) = self.max_bounds else {
            return center;
        };
        match self.bounds_limit_option {
            BoundsLimitOption::CompletelyWithinMaxBounds => {
                let half_width = f64::from(self.width) / self.scale / 2.0;
                let half_height = f64::from(self.height) / self.scale / 2.0;
                Coordinate::new(
                    clamp_axis(center.x, half_width, max_bounds.x(), max_bounds.max_x()),
                    clamp_axis(center.y, half_height, max_bounds.y(), max_bounds.max_y()),
                )
            }
            BoundsLimitOption::CenterWithinMaxBounds => Coordinate::new(
                center.x.clamp(max_bounds.x(), max_bounds.max_x()),
                center.y.clamp(max_bounds.y(), max_bounds.max_y()),
            ),
        }
    }
}

/// Keeps `[value - half, value + half]` inside `[min, max]`, centering when it
/// cannot fit.
fn clamp_axis(value: f64, half: f64, min: f64, max: f64) -> f64 {
    if 2.0 * half >= max - min {
        (min + max) / 2.0
    } else {
        value.clamp(min + half, max - half)
    }
}

fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

fn sorted_resolutions(mut resolutions: Vec<f64>) -> Vec<f64> {
    let before = resolutions.len();
    resolutions.retain(|r| r.is_finite() && *r > 0.0);
    if resolutions.len() != before {
        tracing::warn!(dropped = before - resolutions.len(), "ignoring non-positive resolutions");
    }
    resolutions.sort_by(|a, b| b.total_cmp(a));
    resolutions.dedup();
    resolutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DELTA: f64 = 1e-9;

    fn assert_bounds(actual: Bbox, expected: Bbox) {
        assert!(actual.equals_delta(&expected, DELTA), "{actual} != {expected}");
    }

    /// 200x100 pixels over max bounds (0, 0, 1000, 400) at scale 1, centered.
    fn map_view(resolutions: Vec<f64>) -> MapView {
        let config = MapViewConfig::default()
            .with_max_bounds(Bbox::new(0.0, 0.0, 1000.0, 400.0))
            .with_maximum_scale(2.0)
            .with_resolutions(resolutions)
            .with_bounds_limit_option(BoundsLimitOption::CompletelyWithinMaxBounds);
        let mut view = MapView::with_config(config);
        view.set_size(200, 100);
        view.set_current_scale(1.0, ZoomOption::Exact);
        view.set_center_position(Coordinate::new(500.0, 200.0));
        view
    }

    fn record(view: &mut MapView) -> Rc<RefCell<Vec<MapViewChangedEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        view.add_map_view_changed_handler(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn test_initial_bounds() {
        let view = map_view(Vec::new());
        assert_eq!(view.current_scale(), 1.0);
        assert_bounds(view.bounds(), Bbox::new(400.0, 150.0, 200.0, 100.0));
    }

    #[test]
    fn test_completely_within_max_bounds() {
        let mut view = map_view(Vec::new());
        let events = record(&mut view);

        assert!(view.set_center_position(Coordinate::new(900.0, 300.0)));
        assert_bounds(view.bounds(), Bbox::new(800.0, 250.0, 200.0, 100.0));
        assert!(events.borrow()[0].is_panning);
        assert!(events.borrow()[0].is_same_scale_level);

        assert!(view.set_center_position(Coordinate::new(1000.0, 400.0)));
        assert_bounds(view.bounds(), Bbox::new(800.0, 300.0, 200.0, 100.0));

        assert!(!view.translate(100.0, 100.0));
        assert_bounds(view.bounds(), Bbox::new(800.0, 300.0, 200.0, 100.0));
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_center_within_max_bounds() {
        let mut view = map_view(Vec::new());
        view.set_view_bounds_limit_option(BoundsLimitOption::CenterWithinMaxBounds);

        view.set_center_position(Coordinate::new(1000.0, 400.0));
        assert_bounds(view.bounds(), Bbox::new(900.0, 350.0, 200.0, 100.0));

        view.set_center_position(Coordinate::new(1200.0, -50.0));
        assert_eq!(view.center_position(), Coordinate::new(1000.0, 0.0));
    }

    #[test]
    fn test_closest_resolution() {
        let mut view = map_view(vec![1.0 / 0.01, 1.0 / 0.1, 1.0 / 0.4, 1.0 / 1.0, 1.0 / 2.0]);
        assert_eq!(view.resolution_index(), Some(3));

        assert!(view.set_current_scale(0.5, ZoomOption::LevelClosest));
        assert!((view.current_scale() - 0.4).abs() < DELTA);
        assert_eq!(view.resolution_index(), Some(2));
        assert_bounds(view.bounds(), Bbox::new(250.0, 75.0, 500.0, 250.0));

        view.set_size(160, 80);
        assert_bounds(view.bounds(), Bbox::new(300.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn test_level_fit_zooms_out() {
        let mut view = map_view(vec![100.0, 10.0, 2.5, 1.0, 0.5]);
        view.set_current_scale(0.9, ZoomOption::LevelFit);
        assert!((view.current_scale() - 0.4).abs() < DELTA);

        view.set_current_scale(1.0, ZoomOption::LevelFit);
        assert!((view.current_scale() - 1.0).abs() < DELTA);
    }

    #[test]
    fn test_level_change_always_moves() {
        let mut view = map_view(vec![100.0, 10.0, 2.5, 1.0, 0.5]);
        let events = record(&mut view);

        // 1.1 alone would snap back to level 3.
        assert!(view.set_current_scale(1.1, ZoomOption::LevelChange));
        assert!((view.current_scale() - 2.0).abs() < DELTA);
        assert!(!events.borrow()[0].is_same_scale_level);
        assert!(!events.borrow()[0].is_panning);

        assert!(view.set_current_scale(1.9, ZoomOption::LevelChange));
        assert!((view.current_scale() - 1.0).abs() < DELTA);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut view = map_view(Vec::new());
        view.set_current_scale(50.0, ZoomOption::Exact);
        assert_eq!(view.current_scale(), 2.0);

        // 200x100 pixels inside 1000x400 needs at least 0.25.
        view.set_current_scale(0.01, ZoomOption::Exact);
        assert_eq!(view.current_scale(), 0.25);
        assert_bounds(view.bounds(), Bbox::new(100.0, 0.0, 800.0, 400.0));
    }

    #[test]
    fn test_resolutions_respect_limits() {
        let mut view = map_view(vec![100.0, 10.0, 2.5, 1.0, 0.5]);
        view.set_current_scale(0.001, ZoomOption::LevelClosest);
        assert!((view.current_scale() - 0.4).abs() < DELTA);
        view.set_current_scale(100.0, ZoomOption::LevelClosest);
        assert!((view.current_scale() - 2.0).abs() < DELTA);
    }

    #[test]
    fn test_set_maximum_scale_clamps_current_scale() {
        let mut view = map_view(Vec::new());
        view.set_current_scale(2.0, ZoomOption::Exact);
        let events = record(&mut view);

        assert!(view.set_maximum_scale(1.0));
        assert_eq!(view.current_scale(), 1.0);
        assert_bounds(view.bounds(), Bbox::new(400.0, 150.0, 200.0, 100.0));
        assert!(!view.set_maximum_scale(1.0));
        assert!(!view.set_maximum_scale(0.0));
        assert_eq!(view.maximum_scale(), 1.0);

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].zoom_option, None);
        assert!(!events[0].is_panning);
    }

    #[test]
    fn test_set_resolutions_snaps_current_scale() {
        let mut view = map_view(Vec::new());
        let events = record(&mut view);

        assert!(view.set_resolutions(vec![2.0, 4.0]));
        assert_eq!(view.resolutions(), &[4.0, 2.0]);
        assert_eq!(view.current_scale(), 0.5);
        assert_eq!(view.resolution_index(), Some(1));
        assert_bounds(view.bounds(), Bbox::new(300.0, 100.0, 400.0, 200.0));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_no_level_within_limits_keeps_clamped_scale() {
        // Scales 0.01 and 0.02 are both below the minimum scale of 0.25.
        let mut view = map_view(Vec::new());
        assert!(!view.set_resolutions(vec![100.0, 50.0]));
        assert_eq!(view.current_scale(), 1.0);

        assert!(view.set_current_scale(0.6, ZoomOption::LevelClosest));
        assert_eq!(view.current_scale(), 0.6);
        view.set_current_scale(0.01, ZoomOption::LevelFit);
        assert_eq!(view.current_scale(), 0.25);
    }

    #[test]
    fn test_set_max_bounds_reclamps_view() {
        let mut view = map_view(Vec::new());
        let events = record(&mut view);

        assert!(view.set_max_bounds(Some(Bbox::new(0.0, 0.0, 300.0, 300.0))));
        assert_eq!(view.current_scale(), 1.0);
        assert_bounds(view.bounds(), Bbox::new(100.0, 150.0, 200.0, 100.0));

        // 200x100 pixels inside 100x100 needs scale 2.
        assert!(view.set_max_bounds(Some(Bbox::new(0.0, 0.0, 100.0, 100.0))));
        assert_eq!(view.current_scale(), 2.0);
        assert_bounds(view.bounds(), Bbox::new(0.0, 50.0, 100.0, 50.0));

        assert!(!view.set_max_bounds(None));
        assert_eq!(view.max_bounds(), None);
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_minimum_scale_per_limit_option() {
        let mut view = map_view(Vec::new());
        assert_eq!(view.minimum_scale(), 0.25);

        view.set_view_bounds_limit_option(BoundsLimitOption::CenterWithinMaxBounds);
        assert_eq!(view.minimum_scale(), 0.2);
        view.set_current_scale(0.01, ZoomOption::Exact);
        assert_eq!(view.current_scale(), 0.2);
        assert_bounds(view.bounds(), Bbox::new(0.0, -50.0, 1000.0, 500.0));

        view.set_max_bounds(None);
        assert_eq!(view.minimum_scale(), 0.0);
    }

    #[test]
    fn test_idempotent_calls_fire_once() {
        let mut view = map_view(vec![100.0, 10.0, 2.5, 1.0, 0.5]);
        let events = record(&mut view);

        assert!(view.set_center_position(Coordinate::new(450.0, 180.0)));
        assert!(!view.set_center_position(Coordinate::new(450.0, 180.0)));
        assert!(view.set_current_scale(2.0, ZoomOption::LevelClosest));
        assert!(!view.set_current_scale(2.0, ZoomOption::LevelClosest));
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_apply_bounds() {
        let mut view = map_view(Vec::new());
        assert!(view.apply_bounds(&Bbox::new(100.0, 100.0, 400.0, 100.0), ZoomOption::Exact));
        assert_eq!(view.current_scale(), 0.5);
        assert_bounds(view.bounds(), Bbox::new(100.0, 50.0, 400.0, 200.0));
    }

    #[test]
    fn test_scale_at_keeps_point_fixed() {
        let mut view = map_view(Vec::new());
        let anchor = Coordinate::new(450.0, 175.0);
        let before = view.world_to_view(&anchor);
        view.scale_at(2.0, ZoomOption::Exact, anchor);
        assert_eq!(view.current_scale(), 2.0);
        assert!(view.world_to_view(&anchor).equals_delta(&before, DELTA));
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut view = map_view(Vec::new());
        let events = record(&mut view);
        assert!(view.set_size(400, 200));
        assert_bounds(view.bounds(), Bbox::new(300.0, 100.0, 400.0, 200.0));
        let event = &events.borrow()[0];
        assert!(event.is_map_resized);
        assert!(!event.is_panning);
        assert!(event.is_same_scale_level);
    }

    #[test]
    fn test_remove_handler() {
        let mut view = map_view(Vec::new());
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let registration = view.add_map_view_changed_handler(move |_| *sink.borrow_mut() += 1);
        view.translate(10.0, 0.0);
        assert!(view.remove_handler(registration));
        view.translate(10.0, 0.0);
        assert_eq!(*count.borrow(), 1);
        assert!(!view.remove_handler(registration));
    }

    #[test]
    fn test_invalid_requests_are_ignored() {
        let mut view = map_view(Vec::new());
        assert!(!view.set_current_scale(f64::NAN, ZoomOption::Exact));
        assert!(!view.set_current_scale(-1.0, ZoomOption::Exact));
        assert!(!view.set_center_position(Coordinate::new(f64::INFINITY, 0.0)));
        assert_eq!(view.current_scale(), 1.0);
    }

    #[test]
    fn test_option_names() {
        assert_eq!("LEVEL_CLOSEST".parse::<ZoomOption>(), Ok(ZoomOption::LevelClosest));
        assert_eq!("level_fit".parse::<ZoomOption>(), Ok(ZoomOption::LevelFit));
        assert_eq!(
            "center_within_max_bounds".parse::<BoundsLimitOption>(),
            Ok(BoundsLimitOption::CenterWithinMaxBounds)
        );
        assert!("sideways".parse::<ZoomOption>().is_err());
    }
}
