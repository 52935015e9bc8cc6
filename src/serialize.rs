use ncollide2d::na::Point2;
use serde::Serialize;

#[derive(Serialize)]
#[serde(remote = "Point2<f64>")]
pub struct Point2f64 {
    x: f64,
    y: f64,
}

/// Field adapter for serializing an ordered point sequence through the
/// [`Point2f64`] remote wrapper.
pub mod point_seq {
    use super::Point2f64;
    use ncollide2d::na::Point2;
    use serde::ser::SerializeSeq;
    use serde::{Serialize, Serializer};

    pub fn serialize<S>(points: &[Point2<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Wrap(#[serde(with = "Point2f64")] Point2<f64>);

        let mut seq = serializer.serialize_seq(Some(points.len()))?;
        for p in points.iter() {
            seq.serialize_element(&Wrap(*p))?;
        }
        seq.end()
    }
}
