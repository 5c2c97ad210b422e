use crate::model::{Bbox, Coordinate};

// Pure conversions between world space and the pixel space of a view.
// Screen y grows downwards, world y upwards.

/// World extent shown by a `width` x `height` pixel view at `scale` pixels per unit.
pub fn view_bounds(center: Coordinate, width: f64, height: f64, scale: f64) -> Bbox {
    Bbox::centered_at(center, width / scale, height / scale)
}

/// Largest scale at which `bounds` fits entirely inside the pixel area, `None`
/// when either side of `bounds` is degenerate.
pub fn fit_scale(bounds: &Bbox, width: f64, height: f64) -> Option<f64> {
    let scale_x = (bounds.width() > 0.0).then(|| width / bounds.width());
    let scale_y = (bounds.height() > 0.0).then(|| height / bounds.height());
    match (scale_x, scale_y) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (single, None) | (None, single) => single,
    }
}

pub fn world_to_screen(world: &Coordinate, bounds: &Bbox, scale: f64) -> Coordinate {
    Coordinate::new(
        (world.x - bounds.x()) * scale,
        (bounds.max_y() - world.y) * scale,
    )
}

pub fn screen_to_world(screen: &Coordinate, bounds: &Bbox, scale: f64) -> Coordinate {
    Coordinate::new(
        bounds.x() + screen.x / scale,
        bounds.max_y() - screen.y / scale,
    )
}

/// Center that keeps `fixed` at the same screen position when zooming from
/// `old_scale` to `new_scale` around `center`.
pub fn rescale_center(center: Coordinate, fixed: Coordinate, old_scale: f64, new_scale: f64) -> Coordinate {
    let ratio = old_scale / new_scale;
    Coordinate::new(
        fixed.x + (center.x - fixed.x) * ratio,
        fixed.y + (center.y - fixed.y) * ratio,
    )
}
