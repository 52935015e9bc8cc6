use super::Polar;
use crate::errors::Error;
use serde::Serialize;

/// Glide-ratio (finesse) figures for a polar: `CL/CD` for every row in
/// solver order, and the best finite value across the sweep.
#[derive(Clone, Debug, Serialize)]
pub struct Finesse {
    pub ratios: Vec<f64>,
    pub max: f64,
}

/// Computes the finesse of every row and its maximum. Rows where `CD` is
/// zero or the ratio is otherwise non-finite stay in `ratios` as computed
/// but are excluded from the maximum; if no finite ratio remains the metric
/// is undefined. This is a distinct condition from a parse failure, since
/// it can occur on perfectly well-formed data.
pub fn finesse(polar: &Polar) -> Result<Finesse, Error> {
    if polar.is_empty() {
        return Err(Error::MetricUndefined("polar has no rows".to_string()));
    }

    let cl = polar
        .values("CL")
        .ok_or_else(|| Error::MetricUndefined("polar has no CL column".to_string()))?;
    let cd = polar
        .values("CD")
        .ok_or_else(|| Error::MetricUndefined("polar has no CD column".to_string()))?;

    let ratios: Vec<f64> = cl.iter().zip(cd.iter()).map(|(l, d)| l / d).collect();
    let max = ratios
        .iter()
        .copied()
        .filter(|r| r.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if !max.is_finite() {
        return Err(Error::MetricUndefined(
            "every glide ratio is degenerate".to_string(),
        ));
    }

    Ok(Finesse { ratios, max })
}
