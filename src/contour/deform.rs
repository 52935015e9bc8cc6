use super::Contour;
use crate::errors::Error;
use crate::geometry::normals::{outward_upper, vertex_normals};
use ncollide2d::na::{Isometry2, Point2, Vector2};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoiseDistribution {
    Gaussian,
    Uniform,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IceShape {
    Gaussian,
    Triangular,
    Uniform,
}

/// A geometric perturbation of a contour. Applying one yields a new contour
/// with the same point count and ordering; the input is never modified.
///
/// `Noise` and `Ice` act only on upper-surface points (`y >= 0`) inside the
/// chordwise `zone`, displacing each along its locally estimated outward
/// normal. Displacement magnitude never exceeds the requested amplitude or
/// thickness.
pub enum Deformation {
    /// Rigid rotation of the whole contour about `pivot`.
    Rotate { angle: f64, pivot: Point2<f64> },

    /// Per-point rotation by the chord-proportional angle
    /// `alpha(x) = max_angle * x` about the point `(x, pivot_y)`. A planar
    /// shear standing in for a spanwise-twisted blade section, so the local
    /// angle grows toward the trailing edge instead of being a single rigid
    /// rotation.
    Twist { max_angle: f64, pivot_y: f64 },

    /// Random surface roughness: a per-point offset drawn from
    /// gaussian(0, amplitude) or uniform(-amplitude, amplitude), clamped to
    /// the amplitude bound.
    Noise {
        amplitude: f64,
        distribution: NoiseDistribution,
        zone: (f64, f64),
    },

    /// Deterministic ice accretion: a bump profile over the zone that is
    /// zero at the zone edges (gaussian and triangular shapes) and exactly
    /// `max_thickness` at the zone midpoint.
    Ice {
        max_thickness: f64,
        shape: IceShape,
        zone: (f64, f64),
    },
}

impl Deformation {
    /// Applies the deformation, drawing any random offsets from the thread
    /// rng.
    pub fn apply(&self, contour: &Contour) -> Result<Contour, Error> {
        self.apply_with(contour, &mut rand::thread_rng())
    }

    /// Applies the deformation with a caller-supplied rng, for reproducible
    /// noise.
    pub fn apply_with<R: Rng + ?Sized>(
        &self,
        contour: &Contour,
        rng: &mut R,
    ) -> Result<Contour, Error> {
        self.validate()?;

        let points = match self {
            Deformation::Rotate { angle, pivot } => rotate(&contour.points, *angle, pivot),
            Deformation::Twist { max_angle, pivot_y } => {
                twist(&contour.points, *max_angle, *pivot_y)
            }
            Deformation::Noise {
                amplitude,
                distribution,
                zone,
            } => noise(&contour.points, *amplitude, *distribution, *zone, rng)?,
            Deformation::Ice {
                max_thickness,
                shape,
                zone,
            } => ice(&contour.points, *max_thickness, *shape, *zone),
        };

        Ok(Contour::new(contour.name.clone(), points))
    }

    fn validate(&self) -> Result<(), Error> {
        match self {
            Deformation::Rotate { angle, .. } => {
                if !angle.is_finite() {
                    return Err(Error::InvalidParameters(format!(
                        "rotation angle = {} must be finite",
                        angle
                    )));
                }
            }
            Deformation::Twist { max_angle, pivot_y } => {
                if !max_angle.is_finite() || !pivot_y.is_finite() {
                    return Err(Error::InvalidParameters(
                        "twist angle and pivot must be finite".to_string(),
                    ));
                }
            }
            Deformation::Noise {
                amplitude, zone, ..
            } => {
                if !(*amplitude >= 0.0) || !amplitude.is_finite() {
                    return Err(Error::InvalidParameters(format!(
                        "noise amplitude = {} must be non-negative",
                        amplitude
                    )));
                }
                validate_zone(zone)?;
            }
            Deformation::Ice {
                max_thickness,
                zone,
                ..
            } => {
                if !(*max_thickness >= 0.0) || !max_thickness.is_finite() {
                    return Err(Error::InvalidParameters(format!(
                        "ice thickness = {} must be non-negative",
                        max_thickness
                    )));
                }
                validate_zone(zone)?;
            }
        }

        Ok(())
    }
}

fn validate_zone(zone: &(f64, f64)) -> Result<(), Error> {
    if !zone.0.is_finite() || !zone.1.is_finite() || zone.0 >= zone.1 {
        return Err(Error::InvalidParameters(format!(
            "zone ({}, {}) must satisfy x0 < x1",
            zone.0, zone.1
        )));
    }
    Ok(())
}

fn in_zone(x: f64, zone: (f64, f64)) -> bool {
    zone.0 <= x && x <= zone.1
}

fn rotate(points: &[Point2<f64>], angle: f64, pivot: &Point2<f64>) -> Vec<Point2<f64>> {
    let rot = Isometry2::rotation(angle);
    points.iter().map(|p| pivot + rot * (p - pivot)).collect()
}

fn twist(points: &[Point2<f64>], max_angle: f64, pivot_y: f64) -> Vec<Point2<f64>> {
    points
        .iter()
        .map(|p| {
            let rot = Isometry2::rotation(max_angle * p.x);
            Point2::new(p.x, pivot_y) + rot * Vector2::new(0.0, p.y - pivot_y)
        })
        .collect()
}

fn noise<R: Rng + ?Sized>(
    points: &[Point2<f64>],
    amplitude: f64,
    distribution: NoiseDistribution,
    zone: (f64, f64),
    rng: &mut R,
) -> Result<Vec<Point2<f64>>, Error> {
    let gaussian = Normal::new(0.0, amplitude)
        .map_err(|e| Error::InvalidParameters(format!("noise amplitude: {}", e)))?;
    let uniform = Uniform::new_inclusive(-amplitude, amplitude);
    let normals = vertex_normals(points);

    let displaced = points
        .iter()
        .zip(normals)
        .map(|(p, n)| {
            if p.y < 0.0 || !in_zone(p.x, zone) {
                return *p;
            }
            match n {
                Some(n) => {
                    let offset = match distribution {
                        NoiseDistribution::Gaussian => gaussian.sample(rng),
                        NoiseDistribution::Uniform => uniform.sample(rng),
                    };
                    *p + outward_upper(n).into_inner() * offset.clamp(-amplitude, amplitude)
                }
                None => *p,
            }
        })
        .collect();

    Ok(displaced)
}

fn ice(
    points: &[Point2<f64>],
    max_thickness: f64,
    shape: IceShape,
    zone: (f64, f64),
) -> Vec<Point2<f64>> {
    let mid = (zone.0 + zone.1) / 2.0;
    let half_width = (zone.1 - zone.0) / 2.0;
    let normals = vertex_normals(points);

    points
        .iter()
        .zip(normals)
        .map(|(p, n)| {
            if p.y < 0.0 || !in_zone(p.x, zone) {
                return *p;
            }
            match n {
                Some(n) => {
                    let h = match shape {
                        IceShape::Gaussian => {
                            let sigma = (zone.1 - zone.0) / 6.0;
                            let g = (-(p.x - mid).powi(2) / (2.0 * sigma * sigma)).exp();
                            let g_edge = (-half_width.powi(2) / (2.0 * sigma * sigma)).exp();
                            max_thickness * (g - g_edge) / (1.0 - g_edge)
                        }
                        IceShape::Triangular => {
                            max_thickness * (1.0 - (p.x - mid).abs() / half_width)
                        }
                        IceShape::Uniform => max_thickness,
                    };
                    *p + outward_upper(n).into_inner() * h.max(0.0)
                }
                None => *p,
            }
        })
        .collect()
}
