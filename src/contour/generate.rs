use super::Contour;
use crate::errors::Error;
use ncollide2d::na::Point2;
use std::f64::consts::PI;

/// Upper and lower surface samples of a generated airfoil, both ordered from
/// the leading edge to the trailing edge, plus the chord they were generated
/// with.
pub struct GeneratedSurfaces {
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
    pub chord: f64,
}

/// Chordwise stations with cosine spacing, `x_i = c * (1 - cos(b_i)) / 2` for
/// `b_i` uniform on `[0, pi]`. Concentrates samples near the leading and
/// trailing edges where curvature is highest.
pub fn cosine_stations(n: usize, chord: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let beta = i as f64 * PI / (n - 1) as f64;
            chord * (1.0 - beta.cos()) / 2.0
        })
        .collect()
}

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the
/// maximum camber, P is the location of the maximum camber, and TT is the
/// maximum thickness of the airfoil as a fraction of the chord. For example,
/// a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
pub struct Naca4Digit {
    m: f64,
    p: f64,
    t: f64,
    chord: f64,
    n: usize,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator, rejecting out-of-domain shape
    /// parameters before any geometry is computed.
    ///
    /// # Arguments
    ///
    /// * `m` - the max camber as a fraction of chord, in `[0, 1)`; on a NACA
    /// 2412 this value should be set to 0.02
    ///
    /// * `p` - the chordwise location of the max camber as a fraction of
    /// chord, in `(0, 1)`; on a NACA 2412 this value should be 0.4
    ///
    /// * `t` - the maximum thickness as a fraction of chord, in `(0, 1)`; on
    /// a NACA 2412 this value should be 0.12
    ///
    /// * `chord` - the actual length of the airfoil chord
    ///
    /// * `n` - the number of chordwise stations per surface, at least 2
    pub fn new(m: f64, p: f64, t: f64, chord: f64, n: usize) -> Result<Naca4Digit, Error> {
        if !(0.0..1.0).contains(&m) {
            return Err(Error::InvalidParameters(format!(
                "max camber m = {} must lie in [0, 1)",
                m
            )));
        }
        if p <= 0.0 || p >= 1.0 {
            return Err(Error::InvalidParameters(format!(
                "camber position p = {} must lie in (0, 1)",
                p
            )));
        }
        if t <= 0.0 || t >= 1.0 {
            return Err(Error::InvalidParameters(format!(
                "max thickness t = {} must lie in (0, 1)",
                t
            )));
        }
        if !(chord > 0.0) || !chord.is_finite() {
            return Err(Error::InvalidParameters(format!(
                "chord = {} must be positive and finite",
                chord
            )));
        }
        if n < 2 {
            return Err(Error::InvalidParameters(format!(
                "point count n = {} must be at least 2",
                n
            )));
        }

        Ok(Naca4Digit { m, p, t, chord, n })
    }

    /// Half thickness at the chord fraction `xi`, in chord units, from the
    /// standard quartic thickness polynomial scaled by `t / 0.2`.
    fn half_thickness(&self, xi: f64) -> f64 {
        (5.0 * self.t * self.chord)
            * (0.2969 * xi.sqrt() - 0.1260 * xi - 0.3516 * xi.powi(2) + 0.2843 * xi.powi(3)
                - 0.1015 * xi.powi(4))
    }

    /// Camber line height and slope at the chord fraction `xi`. The slope in
    /// both branches is `2m/k^2 * (p - xi)` with `k` the branch width, the
    /// exact derivative of the piecewise quadratics, so the camber line is
    /// continuous and differentiable at `xi = p`.
    fn camber(&self, xi: f64) -> (f64, f64) {
        if self.m == 0.0 {
            return (0.0, 0.0);
        }

        let (yc, slope) = if xi < self.p {
            let k = self.p.powi(2);
            (
                self.m / k * (2.0 * self.p * xi - xi.powi(2)),
                2.0 * self.m / k * (self.p - xi),
            )
        } else {
            let k = (1.0 - self.p).powi(2);
            (
                self.m / k * ((1.0 - 2.0 * self.p) + 2.0 * self.p * xi - xi.powi(2)),
                2.0 * self.m / k * (self.p - xi),
            )
        };

        (yc * self.chord, slope)
    }

    /// Generates both surfaces by offsetting the camber line along its local
    /// normal by the half thickness at each cosine-spaced station.
    pub fn surfaces(&self) -> GeneratedSurfaces {
        let mut upper = Vec::with_capacity(self.n);
        let mut lower = Vec::with_capacity(self.n);

        for x in cosine_stations(self.n, self.chord) {
            let xi = x / self.chord;
            let yt = self.half_thickness(xi);
            let (yc, slope) = self.camber(xi);
            let theta = slope.atan();

            upper.push(Point2::new(
                x - yt * theta.sin(),
                yc + yt * theta.cos(),
            ));
            lower.push(Point2::new(
                x + yt * theta.sin(),
                yc - yt * theta.cos(),
            ));
        }

        GeneratedSurfaces {
            upper,
            lower,
            chord: self.chord,
        }
    }

    /// Generates the canonically ordered contour (trailing edge over the
    /// upper surface to the leading edge and back along the lower surface).
    pub fn contour(&self, name: impl Into<String>) -> Contour {
        let s = self.surfaces();
        Contour::from_surfaces(name, &s.upper, &s.lower)
    }
}
