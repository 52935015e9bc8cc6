use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory layout for everything the pipeline reads and writes: generated
/// and imported contours, iced variants, and solver polars. An explicit
/// value handed to call sites — never process-wide state — so two pipelines
/// rooted differently cannot collide.
#[derive(Clone, Debug)]
pub struct DataLayout {
    root: PathBuf,
}

const GENERATED: &str = "profiles_generated";
const IMPORTED: &str = "profiles_imported";
const ICED: &str = "profiles_iced";
const POLARS: &str = "polars";

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> DataLayout {
        DataLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the directory tree if it is not already present.
    pub fn ensure(&self) -> io::Result<()> {
        for sub in [GENERATED, IMPORTED, ICED, POLARS] {
            fs::create_dir_all(self.root.join(sub))?;
        }
        Ok(())
    }

    /// Coordinate table of a generated profile.
    pub fn coordinate_file(&self, name: &str) -> PathBuf {
        self.root.join(GENERATED).join(format!("{}_coords.csv", name))
    }

    /// Solver contour file of a generated profile.
    pub fn contour_file(&self, name: &str) -> PathBuf {
        self.root.join(GENERATED).join(format!("{}_contour.dat", name))
    }

    /// Solver contour file of an imported profile.
    pub fn imported_contour_file(&self, name: &str) -> PathBuf {
        self.root.join(IMPORTED).join(format!("{}_contour.dat", name))
    }

    /// Contour file of an ice-accreted variant.
    pub fn iced_contour_file(&self, name: &str) -> PathBuf {
        self.root.join(ICED).join(format!("{}_iced.dat", name))
    }

    /// Polar accumulation file a solver run writes for a profile. Distinct
    /// per name, which is what keeps concurrent runs from sharing an output
    /// artifact.
    pub fn polar_file(&self, name: &str) -> PathBuf {
        self.root.join(POLARS).join(format!("{}_polar.txt", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_distinct_per_profile() {
        let layout = DataLayout::new("data");
        assert_ne!(layout.polar_file("a"), layout.polar_file("b"));
        assert_ne!(layout.contour_file("a"), layout.iced_contour_file("a"));
        assert_ne!(layout.contour_file("a"), layout.imported_contour_file("a"));
    }

    #[test]
    fn test_paths_live_under_root() {
        let layout = DataLayout::new("/tmp/foo");
        assert!(layout.coordinate_file("x").starts_with("/tmp/foo"));
        assert!(layout.polar_file("x").starts_with("/tmp/foo"));
    }

    #[test]
    fn test_ensure_creates_tree() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        layout.ensure().unwrap();

        assert!(layout.coordinate_file("x").parent().unwrap().is_dir());
        assert!(layout.imported_contour_file("x").parent().unwrap().is_dir());
        assert!(layout.iced_contour_file("x").parent().unwrap().is_dir());
        assert!(layout.polar_file("x").parent().unwrap().is_dir());
    }
}
