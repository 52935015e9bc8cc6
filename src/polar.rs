use crate::errors::Error;
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub mod metrics;

/// Aerodynamic coefficients versus angle of attack, exactly as the solver
/// accumulated them: named columns and one numeric row per converged angle,
/// in solver order (never re-sorted).
#[derive(Clone, Debug, Serialize)]
pub struct Polar {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Polar {
    /// Parses the solver's free-form text output. Everything before the
    /// header line whose first token starts with `alpha` (any case) is
    /// metadata and discarded; separator lines of dashes are skipped; a data
    /// line with a token count different from the header is rejected.
    pub fn parse_text(content: &str) -> Result<Polar, Error> {
        let mut columns: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut rejected = 0usize;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match &columns {
                None => {
                    if line.to_ascii_lowercase().starts_with("alpha") {
                        columns = Some(line.split_whitespace().map(String::from).collect());
                    }
                }
                Some(names) => {
                    if line.chars().all(|c| c == '-' || c == ' ') {
                        continue;
                    }
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    if tokens.len() != names.len() {
                        rejected += 1;
                        continue;
                    }
                    match tokens.iter().map(|t| t.parse::<f64>()).collect() {
                        Ok(row) => rows.push(row),
                        Err(_) => rejected += 1,
                    }
                }
            }
        }

        if rejected > 0 {
            warn!("rejected {} malformed polar rows", rejected);
        }

        let columns = columns
            .ok_or_else(|| Error::PolarFormat("no alpha header line found".to_string()))?;
        if rows.is_empty() {
            return Err(Error::PolarFormat(
                "no valid data rows after the header".to_string(),
            ));
        }

        Ok(Polar { columns, rows })
    }

    pub fn read_text(path: &Path) -> Result<Polar, Error> {
        Polar::parse_text(&fs::read_to_string(path)?)
    }

    /// Parses the comma-separated polar exports reference databases serve,
    /// where `#` lines are comments and the first remaining line names the
    /// columns.
    pub fn parse_csv(content: &str) -> Result<Polar, Error> {
        let mut columns: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut rejected = 0usize;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match &columns {
                None => {
                    columns = Some(line.split(',').map(|f| f.trim().to_string()).collect());
                }
                Some(names) => {
                    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
                    if fields.len() != names.len() {
                        rejected += 1;
                        continue;
                    }
                    match fields.iter().map(|f| f.parse::<f64>()).collect() {
                        Ok(row) => rows.push(row),
                        Err(_) => rejected += 1,
                    }
                }
            }
        }

        if rejected > 0 {
            warn!("rejected {} malformed polar rows", rejected);
        }

        let columns =
            columns.ok_or_else(|| Error::PolarFormat("no header line found".to_string()))?;
        if rows.is_empty() {
            return Err(Error::PolarFormat(
                "no valid data rows after the header".to_string(),
            ));
        }

        Ok(Polar { columns, rows })
    }

    pub fn read_csv(path: &Path) -> Result<Polar, Error> {
        Polar::parse_csv(&fs::read_to_string(path)?)
    }

    /// Writes the table back out as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<(), Error> {
        let mut file = File::create(path)?;
        writeln!(file, "{}", self.columns.join(","))?;
        for row in self.rows.iter() {
            let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(file, "{}", fields.join(","))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, looked up by case-insensitive name.
    pub fn values(&self, column: &str) -> Option<Vec<f64>> {
        let index = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}
