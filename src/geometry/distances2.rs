use ncollide2d::na::{Point2, RealField, Vector2};

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

pub fn signed_angle<N: RealField + Copy>(v1: &Vector2<N>, v2: &Vector2<N>) -> N {
    (v1.x * v2.y - v1.y * v2.x).atan2(v1.x * v2.x + v1.y * v2.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case((1.0, 0.0), (0.0, 1.0), std::f64::consts::FRAC_PI_2; "ccw_quarter_turn")]
    #[test_case((1.0, 0.0), (0.0, -1.0), -std::f64::consts::FRAC_PI_2; "cw_quarter_turn")]
    #[test_case((1.0, 0.0), (1.0, 1.0), std::f64::consts::FRAC_PI_4; "ccw_eighth_turn")]
    fn test_signed_angle(a: (f64, f64), b: (f64, f64), e: f64) {
        let v1 = Vector2::new(a.0, a.1);
        let v2 = Vector2::new(b.0, b.1);
        assert_relative_eq!(e, signed_angle(&v1, &v2), epsilon = 1e-12);
    }

    #[test]
    fn test_dist() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        assert_relative_eq!(5.0, dist(&a, &b), epsilon = 1e-12);
    }
}
