use thiserror::Error;

/// Failure conditions of the geometry-and-solver pipeline. Nothing here is
/// retried internally; every variant propagates to the caller as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape or deformation inputs outside their domain, rejected before any
    /// computation takes place.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A coordinate or contour file could not be interpreted (all lines
    /// malformed, or no points at all).
    #[error("unreadable contour data: {0}")]
    ContourFormat(String),

    /// The external solver could not be run to completion: missing
    /// executable, timeout, nonzero exit, or the declared output artifact was
    /// never produced. Captured stderr is kept for diagnostics.
    #[error("solver execution failed: {message}")]
    SolverExecution { message: String, stderr: String },

    /// The solver's text output had no recognizable data block.
    #[error("polar output not usable: {0}")]
    PolarFormat(String),

    /// A performance figure cannot be computed from otherwise well-formed
    /// polar data (empty table, or every row degenerate).
    #[error("performance metric undefined: {0}")]
    MetricUndefined(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn solver(message: impl Into<String>, stderr: impl Into<String>) -> Error {
        Error::SolverExecution {
            message: message.into(),
            stderr: stderr.into(),
        }
    }
}
