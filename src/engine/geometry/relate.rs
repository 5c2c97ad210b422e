use crate::engine::mathlib;
use crate::model::Coordinate;

use super::Polygon;

/// Boundary paths plus areal parts of a geometry, the shape the intersection and
/// distance tests operate on. Single-coordinate paths stand for points.
#[derive(Clone, Debug, Default)]
pub struct Components<'a> {
    pub paths: Vec<&'a [Coordinate]>,
    pub polygons: Vec<&'a Polygon>,
}

impl<'a> Components<'a> {
    pub(crate) fn single_path(path: &'a [Coordinate]) -> Self {
        Components {
            paths: if path.is_empty() { Vec::new() } else { vec![path] },
            polygons: Vec::new(),
        }
    }

    pub(crate) fn merge(parts: impl Iterator<Item = Components<'a>>) -> Self {
        parts.fold(Components::default(), |mut acc, part| {
            acc.paths.extend(part.paths);
            acc.polygons.extend(part.polygons);
            acc
        })
    }
}

fn paths_intersect(a: &[Coordinate], b: &[Coordinate]) -> bool {
    match (a, b) {
        ([p], [q]) => p == q,
        ([p], path) | (path, [p]) => path
            .windows(2)
            .any(|s| mathlib::point_on_segment(p, &s[0], &s[1])),
        _ => a.windows(2).any(|s| {
            b.windows(2)
                .any(|t| mathlib::lines_intersect(&s[0], &s[1], &t[0], &t[1]))
        }),
    }
}

/// Any boundary crossing or touch, or any part of one lying inside an areal part
/// of the other.
pub fn intersects(a: &Components<'_>, b: &Components<'_>) -> bool {
    if a.paths.is_empty() || b.paths.is_empty() {
        return false;
    }
    let boundary = a
        .paths
        .iter()
        .any(|pa| b.paths.iter().any(|pb| paths_intersect(pa, pb)));
    boundary || contains_any(&a.polygons, &b.paths) || contains_any(&b.polygons, &a.paths)
}

fn contains_any(polygons: &[&Polygon], paths: &[&[Coordinate]]) -> bool {
    polygons
        .iter()
        .any(|polygon| paths.iter().any(|path| path.first().is_some_and(|c| polygon.contains(c))))
}

pub fn distance_to_path(coordinate: &Coordinate, path: &[Coordinate]) -> f64 {
    match path {
        [] => f64::INFINITY,
        [p] => coordinate.distance(p),
        _ => path
            .windows(2)
            .map(|s| mathlib::distance_to_segment(coordinate, &s[0], &s[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Shortest distance from `coordinate`, zero inside areal parts. `None` when empty.
pub fn distance(components: &Components<'_>, coordinate: &Coordinate) -> Option<f64> {
    if components.paths.is_empty() {
        return None;
    }
    if components.polygons.iter().any(|polygon| polygon.contains(coordinate)) {
        return Some(0.0);
    }
    Some(
        components
            .paths
            .iter()
            .map(|path| distance_to_path(coordinate, path))
            .fold(f64::INFINITY, f64::min),
    )
}
