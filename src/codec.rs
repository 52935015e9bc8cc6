use crate::contour::Contour;
use crate::errors::Error;
use ncollide2d::na::Point2;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes the generic coordinate table: an `x,y` header line and one
/// comma-separated row per point.
pub fn write_coordinates(contour: &Contour, path: &Path) -> Result<(), Error> {
    let mut file = File::create(path)?;
    writeln!(file, "x,y")?;
    for p in contour.points.iter() {
        writeln!(file, "{},{}", p.x, p.y)?;
    }

    Ok(())
}

/// Reads a coordinate table written by [`write_coordinates`]. The header
/// line is discarded; malformed rows are skipped. Fails only when no valid
/// point survives.
pub fn read_coordinates(name: &str, path: &Path) -> Result<Contour, Error> {
    let content = fs::read_to_string(path)?;
    let points = parse_pairs(content.lines().skip(1), ',');

    if points.is_empty() {
        return Err(Error::ContourFormat(format!(
            "no usable coordinate rows in {}",
            path.display()
        )));
    }

    Ok(Contour::new(name, points))
}

/// Writes the solver-native contour file: the profile name on the first
/// line, then one `"%.6f %.6f"` pair per point in the canonical trailing
/// edge, upper surface, leading edge, lower surface order. Coordinates are
/// emitted as stored; normalize the contour first if it is not already in
/// chord units.
pub fn write_dat(contour: &Contour, path: &Path) -> Result<(), Error> {
    let mut file = File::create(path)?;
    writeln!(file, "{}", contour.name)?;
    for p in contour.points.iter() {
        writeln!(file, "{:.6} {:.6}", p.x, p.y)?;
    }

    Ok(())
}

/// Reads a solver contour file (also the Selig-style listings reference
/// databases export): first line is the profile name, the rest are
/// whitespace-separated coordinate pairs. Malformed lines are skipped; a
/// file with no valid pair at all fails.
pub fn read_dat(path: &Path) -> Result<Contour, Error> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    let name = match lines.next() {
        Some(line) if !line.trim().is_empty() => line.trim().to_string(),
        _ => {
            return Err(Error::ContourFormat(format!(
                "{} has no name line",
                path.display()
            )))
        }
    };

    let points = parse_pairs(lines, ' ');
    if points.is_empty() {
        return Err(Error::ContourFormat(format!(
            "no usable coordinate lines in {}",
            path.display()
        )));
    }

    Ok(Contour::new(name, points))
}

/// Writes the contour as JSON for downstream consumers.
pub fn write_json(contour: &Contour, path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, contour)
        .map_err(|e| Error::ContourFormat(format!("could not encode {}: {}", path.display(), e)))
}

fn parse_pairs<'a, I>(lines: I, separator: char) -> Vec<Point2<f64>>
where
    I: Iterator<Item = &'a str>,
{
    let mut points = Vec::new();
    let mut skipped = 0usize;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = if separator == ' ' {
            itertools::Either::Left(line.split_whitespace())
        } else {
            itertools::Either::Right(line.split(separator).map(str::trim))
        };

        let x = fields.next().and_then(|f| f.parse::<f64>().ok());
        let y = fields.next().and_then(|f| f.parse::<f64>().ok());
        match (x, y) {
            (Some(x), Some(y)) => points.push(Point2::new(x, y)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("skipped {} malformed coordinate lines", skipped);
    }

    points
}
