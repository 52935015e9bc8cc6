use itertools::Itertools;
use ncollide2d::na::{Point2, Unit, Vector2};

pub type UnitVec2 = Unit<Vector2<f64>>;

const DEGENERATE_TOL: f64 = 1e-12;

/// Estimates a unit normal at every vertex of an ordered point sequence. The
/// tangent at an interior vertex is the central difference of its neighbors;
/// the two end vertices use the one-sided difference. The normal is the
/// tangent turned a quarter turn counter-clockwise. A vertex whose tangent
/// collapses below tolerance (coincident neighbors) yields `None`.
pub fn vertex_normals(points: &[Point2<f64>]) -> Vec<Option<UnitVec2>> {
    if points.len() < 2 {
        return vec![None; points.len()];
    }

    let mut tangents: Vec<Vector2<f64>> = Vec::with_capacity(points.len());
    tangents.push(points[1] - points[0]);
    for (prev, _, next) in points.iter().tuple_windows() {
        tangents.push(next - prev);
    }
    tangents.push(points[points.len() - 1] - points[points.len() - 2]);

    tangents
        .iter()
        .map(|t| Unit::try_new(Vector2::new(-t.y, t.x), DEGENERATE_TOL))
        .collect()
}

/// Flips a surface normal so it points away from the mean line on the upper
/// surface, i.e. into the positive-y half plane.
pub fn outward_upper(n: UnitVec2) -> UnitVec2 {
    if n.y < 0.0 {
        -n
    } else {
        n
    }
}
