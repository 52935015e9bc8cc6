use crate::errors::Error;
use crate::geometry::distances2::dist;
use crate::serialize::point_seq;
use ncollide2d::na::Point2;
use serde::Serialize;

pub mod deform;
pub mod generate;

/// An airfoil section contour: a named, ordered sequence of planar points.
/// The canonical ordering traces the closed outline starting at the trailing
/// edge, along the upper surface (extrados) to the leading edge, then back
/// along the lower surface (intrados) to the trailing edge.
///
/// A contour is never mutated in place; deformation and normalization return
/// new values.
#[derive(Clone, Debug, Serialize)]
pub struct Contour {
    pub name: String,
    #[serde(with = "point_seq")]
    pub points: Vec<Point2<f64>>,
}

impl Contour {
    pub fn new(name: impl Into<String>, points: Vec<Point2<f64>>) -> Contour {
        Contour {
            name: name.into(),
            points,
        }
    }

    /// Assembles the canonical ordering from upper and lower surface point
    /// sequences, both ordered leading edge to trailing edge. The shared
    /// leading-edge sample of the lower surface is dropped so the point
    /// appears once.
    pub fn from_surfaces(
        name: impl Into<String>,
        upper: &[Point2<f64>],
        lower: &[Point2<f64>],
    ) -> Contour {
        let mut points: Vec<Point2<f64>> = upper.iter().rev().copied().collect();
        points.extend(lower.iter().skip(1).copied());
        Contour::new(name, points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the first and last points coincide within tolerance, i.e.
    /// the sequence traces a closed outline.
    pub fn is_closed(&self, tol: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => dist(first, last) <= tol,
            _ => false,
        }
    }

    /// Chord length as the x extent of the contour.
    pub fn chord(&self) -> f64 {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for p in self.points.iter() {
            min = min.min(p.x);
            max = max.max(p.x);
        }
        if max > min {
            max - min
        } else {
            0.0
        }
    }

    /// Returns a copy rescaled so the chord spans one unit, the form the
    /// solver contour file expects. Fails on an empty or zero-extent contour.
    pub fn normalized(&self) -> Result<Contour, Error> {
        let chord = self.chord();
        if chord <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "contour '{}' has no chordwise extent to normalize by",
                self.name
            )));
        }

        let points = self
            .points
            .iter()
            .map(|p| Point2::new(p.x / chord, p.y / chord))
            .collect();
        Ok(Contour::new(self.name.clone(), points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn surfaces() -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
        let upper = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.08),
            Point2::new(1.0, 0.01),
        ];
        let lower = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.5, -0.06),
            Point2::new(1.0, -0.01),
        ];
        (upper, lower)
    }

    #[test]
    fn test_from_surfaces_ordering() {
        let (upper, lower) = surfaces();
        let contour = Contour::from_surfaces("test", &upper, &lower);

        // trailing edge first, leading edge in the middle, trailing edge last
        assert_eq!(5, contour.len());
        assert_relative_eq!(1.0, contour.points[0].x);
        assert_relative_eq!(0.01, contour.points[0].y);
        assert_relative_eq!(0.0, contour.points[2].x);
        assert_relative_eq!(1.0, contour.points[4].x);
        assert_relative_eq!(-0.01, contour.points[4].y);
    }

    #[test]
    fn test_leading_edge_not_duplicated() {
        let (upper, lower) = surfaces();
        let contour = Contour::from_surfaces("test", &upper, &lower);
        let at_le = contour
            .points
            .iter()
            .filter(|p| p.x.abs() < 1e-12)
            .count();
        assert_eq!(1, at_le);
    }

    #[test]
    fn test_closure_check() {
        let (upper, lower) = surfaces();
        let contour = Contour::from_surfaces("test", &upper, &lower);
        assert!(contour.is_closed(0.05));
        assert!(!contour.is_closed(1e-6));
    }

    #[test]
    fn test_normalized_chord() {
        let points = vec![
            Point2::new(4.0, 0.2),
            Point2::new(0.0, 0.0),
            Point2::new(4.0, -0.2),
        ];
        let contour = Contour::new("wide", points);
        assert_relative_eq!(4.0, contour.chord());

        let unit = contour.normalized().unwrap();
        assert_relative_eq!(1.0, unit.chord(), epsilon = 1e-12);
        assert_relative_eq!(0.05, unit.points[0].y, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_rejects_degenerate() {
        let contour = Contour::new("flat", vec![Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)]);
        assert!(contour.normalized().is_err());
    }
}
