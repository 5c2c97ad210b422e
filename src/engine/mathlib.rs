use crate::model::Coordinate;

// Exact segment and ring primitives. No tolerance is applied anywhere.

/// Sign of the cross product (b - a) x (c - a).
fn orientation(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// `c` lies inside the bounding rectangle of segment `a`-`b`.
fn within_segment_box(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

pub fn point_on_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> bool {
    orientation(a, b, p) == 0.0 && within_segment_box(a, b, p)
}

/// True when the closed segments `p1`-`p2` and `q1`-`q2` share at least one point,
/// touching endpoints and collinear overlap included.
pub fn lines_intersect(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_segment_box(q1, q2, p1))
        || (d2 == 0.0 && within_segment_box(q1, q2, p2))
        || (d3 == 0.0 && within_segment_box(p1, p2, q1))
        || (d4 == 0.0 && within_segment_box(p1, p2, q2))
}

pub fn distance_to_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_squared = dx * dx + dy * dy;
    if length_squared == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_squared).clamp(0.0, 1.0);
    p.distance(&Coordinate::new(a.x + t * dx, a.y + t * dy))
}

/// Even-odd ray casting. Points on the ring itself are reported as inside.
pub fn point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    for pair in ring.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if point_on_segment(p, a, b) {
            return true;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Pairwise O(n²) check over the segments of `coordinates`. Adjacent segments only
/// conflict when the second one folds back over the first. For closed paths the
/// first and last segment count as adjacent.
pub fn has_self_intersection(coordinates: &[Coordinate], closed: bool) -> bool {
    let segments = coordinates.len().saturating_sub(1);
    if segments < 2 {
        return false;
    }
    for i in 0..segments {
        for j in (i + 1)..segments {
            let (a1, a2) = (&coordinates[i], &coordinates[i + 1]);
            let (b1, b2) = (&coordinates[j], &coordinates[j + 1]);
            let adjacent = j == i + 1 || (closed && i == 0 && j == segments - 1);
            if adjacent {
                if folds_back(a1, a2, b1, b2) {
                    return true;
                }
            } else if lines_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

/// Two segments sharing a vertex overlap beyond that vertex.
fn folds_back(a1: &Coordinate, a2: &Coordinate, b1: &Coordinate, b2: &Coordinate) -> bool {
    let (shared, a_other, b_other) = if a2 == b1 {
        (a2, a1, b2)
    } else if a1 == b2 {
        (a1, a2, b1)
    } else {
        return lines_intersect(a1, a2, b1, b2);
    };
    if shared == a_other || shared == b_other {
        return false;
    }
    let ax = a_other.x - shared.x;
    let ay = a_other.y - shared.y;
    let bx = b_other.x - shared.x;
    let by = b_other.y - shared.y;
    ax * by - ay * bx == 0.0 && ax * bx + ay * by > 0.0
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    ring.windows(2)
        .map(|pair| pair[0].x * pair[1].y - pair[1].x * pair[0].y)
        .sum::<f64>()
        / 2.0
}

pub fn path_length(coordinates: &[Coordinate]) -> f64 {
    coordinates.windows(2).map(|pair| pair[0].distance(&pair[1])).sum()
}

/// Length-weighted average of segment midpoints. Falls back to the first
/// coordinate for zero-length paths.
pub fn path_centroid(coordinates: &[Coordinate]) -> Option<Coordinate> {
    let first = coordinates.first()?;
    let mut total = 0.0;
    let mut x = 0.0;
    let mut y = 0.0;
    for pair in coordinates.windows(2) {
        let length = pair[0].distance(&pair[1]);
        x += length * (pair[0].x + pair[1].x) / 2.0;
        y += length * (pair[0].y + pair[1].y) / 2.0;
        total += length;
    }
    if total == 0.0 {
        return Some(*first);
    }
    Some(Coordinate::new(x / total, y / total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_crossing_segments() {
        assert!(lines_intersect(&c(0.0, 0.0), &c(2.0, 2.0), &c(0.0, 2.0), &c(2.0, 0.0)));
        assert!(!lines_intersect(&c(0.0, 0.0), &c(1.0, 1.0), &c(0.0, 2.0), &c(0.5, 1.9)));
    }

    #[test]
    fn test_touching_and_collinear_segments() {
        assert!(lines_intersect(&c(0.0, 0.0), &c(1.0, 0.0), &c(1.0, 0.0), &c(1.0, 5.0)));
        assert!(lines_intersect(&c(0.0, 0.0), &c(4.0, 0.0), &c(2.0, 0.0), &c(6.0, 0.0)));
        assert!(!lines_intersect(&c(0.0, 0.0), &c(1.0, 0.0), &c(2.0, 0.0), &c(3.0, 0.0)));
    }

    #[test]
    fn test_point_in_ring() {
        let square = [c(0.0, 0.0), c(4.0, 0.0), c(4.0, 4.0), c(0.0, 4.0), c(0.0, 0.0)];
        assert!(point_in_ring(&c(2.0, 2.0), &square));
        assert!(point_in_ring(&c(4.0, 2.0), &square));
        assert!(!point_in_ring(&c(5.0, 2.0), &square));
    }

    #[test]
    fn test_self_intersection() {
        let bowtie = [c(0.0, 0.0), c(2.0, 2.0), c(2.0, 0.0), c(0.0, 2.0), c(0.0, 0.0)];
        assert!(has_self_intersection(&bowtie, true));
        let square = [c(0.0, 0.0), c(4.0, 0.0), c(4.0, 4.0), c(0.0, 4.0), c(0.0, 0.0)];
        assert!(!has_self_intersection(&square, true));
        let spike = [c(0.0, 0.0), c(4.0, 0.0), c(2.0, 0.0)];
        assert!(has_self_intersection(&spike, false));
    }

    #[test]
    fn test_distance_to_segment() {
        assert_eq!(distance_to_segment(&c(1.0, 1.0), &c(0.0, 0.0), &c(2.0, 0.0)), 1.0);
        assert_eq!(distance_to_segment(&c(5.0, 0.0), &c(0.0, 0.0), &c(2.0, 0.0)), 3.0);
    }
}
