use crate::errors::Error;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{info, warn};
use wait_timeout::ChildExt;

const DEFAULT_ITER_LIMIT: u32 = 70;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// One solver invocation: which contour to analyze, the flow regime, the
/// angle-of-attack sweep, and where the polar accumulation file must land.
///
/// Concurrent runs must not share an `output_file` (or a scratch
/// `contour_file`): the solver appends to the polar file incrementally and
/// collisions corrupt it. Path resolution through
/// [`DataLayout`](crate::config::DataLayout) keeps per-profile paths
/// distinct.
pub struct RunSpec {
    pub contour_file: PathBuf,
    pub reynolds: f64,
    pub mach: f64,
    pub alpha_start: f64,
    pub alpha_end: f64,
    pub alpha_step: f64,
    pub output_file: PathBuf,
    /// Iteration cap handed to the solver's viscous solution loop.
    pub iter_limit: u32,
    /// Re-panel the loaded contour before analysis.
    pub repanel: bool,
    /// Hard deadline on the subprocess; a stalled non-converging sweep is
    /// killed when it expires.
    pub timeout: Duration,
}

impl RunSpec {
    /// A spec with the customary sweep (-5 deg to 15 deg in 1 deg steps),
    /// re-paneling on and the default iteration cap and timeout.
    pub fn new(
        contour_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        reynolds: f64,
        mach: f64,
    ) -> RunSpec {
        RunSpec {
            contour_file: contour_file.into(),
            reynolds,
            mach,
            alpha_start: -5.0,
            alpha_end: 15.0,
            alpha_step: 1.0,
            output_file: output_file.into(),
            iter_limit: DEFAULT_ITER_LIMIT,
            repanel: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_sweep(mut self, start: f64, end: f64, step: f64) -> RunSpec {
        self.alpha_start = start;
        self.alpha_end = end;
        self.alpha_step = step;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if !(self.reynolds > 0.0) {
            return Err(Error::InvalidParameters(format!(
                "reynolds = {} must be positive",
                self.reynolds
            )));
        }
        if !(0.0..1.0).contains(&self.mach) {
            return Err(Error::InvalidParameters(format!(
                "mach = {} must lie in [0, 1)",
                self.mach
            )));
        }
        if self.alpha_step == 0.0 || !self.alpha_step.is_finite() {
            return Err(Error::InvalidParameters(
                "alpha_step must be nonzero".to_string(),
            ));
        }
        Ok(())
    }

    /// The ordered directive script piped to the solver's stdin. The solver
    /// is a fixed-format line interpreter; directive spelling and ordering
    /// matter. `PACC` takes the polar save file on the following line and an
    /// empty line declining the dump file; the blank line after the sweep
    /// leaves the operating menu before `QUIT`.
    pub fn command_script(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("LOAD {}", self.contour_file.display()));
        if self.repanel {
            lines.push("PANE".to_string());
        }
        lines.push("OPER".to_string());
        lines.push(format!("ITER {}", self.iter_limit));
        lines.push(format!("VISC {}", self.reynolds));
        lines.push(format!("MACH {}", self.mach));
        lines.push("PACC".to_string());
        lines.push(format!("{}", self.output_file.display()));
        lines.push(String::new());
        lines.push(format!(
            "ASEQ {} {} {}",
            self.alpha_start, self.alpha_end, self.alpha_step
        ));
        lines.push(String::new());
        lines.push("QUIT".to_string());

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}

/// Drives the external panel-method solver over its text protocol. The
/// driver never retries; callers needing resilience re-submit the whole
/// run.
pub struct XfoilDriver {
    executable: PathBuf,
}

impl XfoilDriver {
    pub fn new(executable: impl Into<PathBuf>) -> XfoilDriver {
        XfoilDriver {
            executable: executable.into(),
        }
    }

    /// Runs one sweep and returns the path of the populated polar file.
    ///
    /// Fails without touching the subprocess when the spec is out of domain
    /// or the contour file does not exist. Afterwards, failure means the
    /// executable could not be spawned, the deadline expired (the child is
    /// killed), the solver exited nonzero, or it exited cleanly without
    /// producing the declared output artifact. Angles that never converged
    /// are simply absent from the output; that is not a failure.
    pub fn submit(&self, spec: &RunSpec) -> Result<PathBuf, Error> {
        spec.validate()?;
        if !spec.contour_file.exists() {
            return Err(Error::solver(
                format!("contour file {} does not exist", spec.contour_file.display()),
                String::new(),
            ));
        }

        info!(
            "running {} on {} (Re = {}, M = {})",
            self.executable.display(),
            spec.contour_file.display(),
            spec.reynolds,
            spec.mach
        );

        let mut child = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::solver(
                    format!("could not launch {}: {}", self.executable.display(), e),
                    String::new(),
                )
            })?;

        self.feed_script(&mut child, spec)?;
        let drain_out = drain(child.stdout.take());
        let drain_err = drain(child.stderr.take());

        let status = match child.wait_timeout(spec.timeout)? {
            Some(status) => status,
            None => {
                child.kill().ok();
                child.wait().ok();
                // the drain threads are not joined here: grandchildren of the
                // killed solver may keep the pipes open indefinitely
                warn!("solver timed out after {:?}, killed", spec.timeout);
                return Err(Error::solver(
                    format!("solver timed out after {:?}", spec.timeout),
                    String::new(),
                ));
            }
        };

        let stderr = join_drained(drain_err);
        join_drained(drain_out);

        if !status.success() {
            return Err(Error::solver(
                format!("solver exited with {}", status),
                stderr,
            ));
        }
        if !spec.output_file.exists() {
            return Err(Error::solver(
                format!(
                    "solver exited cleanly but produced no {}",
                    spec.output_file.display()
                ),
                stderr,
            ));
        }

        Ok(spec.output_file.clone())
    }

    fn feed_script(&self, child: &mut Child, spec: &RunSpec) -> Result<(), Error> {
        let script = spec.command_script();
        match child.stdin.take() {
            Some(mut stdin) => {
                // A solver that quits early closes the pipe; that shows up in
                // its exit status, not here.
                stdin.write_all(script.as_bytes()).ok();
                Ok(())
            }
            None => {
                child.kill().ok();
                Err(Error::solver("solver stdin not captured", String::new()))
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut text = String::new();
            pipe.read_to_string(&mut text).ok();
            text
        })
    })
}

fn join_drained(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write as IoWrite;
    use std::path::Path;

    fn dummy_contour(dir: &Path) -> PathBuf {
        let path = dir.join("dummy.dat");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "dummy").unwrap();
        writeln!(file, "1.000000 0.000000").unwrap();
        writeln!(file, "0.000000 0.000000").unwrap();
        path
    }

    #[test]
    fn test_command_script_directive_order() {
        let spec = RunSpec::new("foil.dat", "polar.txt", 50000.0, 0.1).with_sweep(-5.0, 10.0, 0.5);
        let script = spec.command_script();
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!("LOAD foil.dat", lines[0]);
        assert_eq!("PANE", lines[1]);
        assert_eq!("OPER", lines[2]);
        assert_eq!("ITER 70", lines[3]);
        assert_eq!("VISC 50000", lines[4]);
        assert_eq!("MACH 0.1", lines[5]);
        assert_eq!("PACC", lines[6]);
        assert_eq!("polar.txt", lines[7]);
        assert_eq!("", lines[8]);
        assert_eq!("ASEQ -5 10 0.5", lines[9]);
        assert_eq!("", lines[10]);
        assert_eq!("QUIT", lines[11]);
        assert!(script.ends_with('\n'));
    }

    #[test]
    fn test_command_script_without_repanel() {
        let mut spec = RunSpec::new("foil.dat", "polar.txt", 50000.0, 0.1);
        spec.repanel = false;
        let script = spec.command_script();
        assert!(!script.lines().any(|l| l == "PANE"));
        assert_eq!("OPER", script.lines().nth(1).unwrap());
    }

    #[test]
    fn test_missing_contour_fails_before_spawn() {
        // the executable path is nonsense too; reaching the spawn would
        // produce a different message
        let driver = XfoilDriver::new("/definitely/not/a/solver");
        let spec = RunSpec::new("/nowhere/ghost.dat", "polar.txt", 50000.0, 0.1);
        match driver.submit(&spec) {
            Err(Error::SolverExecution { message, .. }) => {
                assert!(message.contains("ghost.dat"));
                assert!(message.contains("does not exist"));
            }
            other => panic!("expected solver error, got {:?}", other.map(|p| p.display().to_string())),
        }
    }

    #[test]
    fn test_invalid_regime_rejected() {
        let driver = XfoilDriver::new("/definitely/not/a/solver");
        let mut spec = RunSpec::new("foil.dat", "polar.txt", 50000.0, 1.5);
        assert!(matches!(
            driver.submit(&spec),
            Err(Error::InvalidParameters(_))
        ));

        spec.mach = 0.1;
        spec.reynolds = 0.0;
        assert!(matches!(
            driver.submit(&spec),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_missing_executable_fails() {
        let dir = tempfile::tempdir().unwrap();
        let contour = dummy_contour(dir.path());

        let driver = XfoilDriver::new("/definitely/not/a/solver");
        let spec = RunSpec::new(contour, dir.path().join("polar.txt"), 50000.0, 0.1);
        match driver.submit(&spec) {
            Err(Error::SolverExecution { message, .. }) => {
                assert!(message.contains("could not launch"));
            }
            _ => panic!("expected launch failure"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_exit_without_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let contour = dummy_contour(dir.path());

        // cat consumes the script and exits zero without writing any polar
        let driver = XfoilDriver::new("/bin/cat");
        let spec = RunSpec::new(contour, dir.path().join("polar.txt"), 50000.0, 0.1);
        match driver.submit(&spec) {
            Err(Error::SolverExecution { message, .. }) => {
                assert!(message.contains("no"));
                assert!(message.contains("polar.txt"));
            }
            _ => panic!("expected missing-artifact failure"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stalled_solver_killed_on_timeout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let contour = dummy_contour(dir.path());

        let stall = dir.path().join("stall.sh");
        let mut file = File::create(&stall).unwrap();
        writeln!(file, "#!/bin/sh").unwrap();
        writeln!(file, "cat > /dev/null").unwrap();
        writeln!(file, "sleep 30").unwrap();
        drop(file);
        std::fs::set_permissions(&stall, std::fs::Permissions::from_mode(0o755)).unwrap();

        let driver = XfoilDriver::new(&stall);
        let mut spec = RunSpec::new(contour, dir.path().join("polar.txt"), 50000.0, 0.1);
        spec.timeout = Duration::from_millis(200);

        match driver.submit(&spec) {
            Err(Error::SolverExecution { message, .. }) => {
                assert!(message.contains("timed out"));
            }
            _ => panic!("expected timeout failure"),
        }
    }
}
