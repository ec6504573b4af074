use crate::core::io::ReportError;
use crate::core::units::UnitMismatchError;
use crate::engine::backends::Backend;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Failed evaluating energy of '{input}': {backend} {stage} stage returned {status}",
        input = input.display(),
        status = describe_status(status)
    )]
    Invocation {
        backend: Backend,
        stage: &'static str,
        input: PathBuf,
        status: Option<i32>,
    },

    #[error("Failed to launch '{program}': {source}", program = program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read energy report '{path}': {source}", path = path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: ReportError,
    },

    #[error(transparent)]
    Units(#[from] UnitMismatchError),

    #[error("Unsupported LAMMPS input mode '{0}'. Expected 'in', 'GtoL' or 'LtoL'.")]
    UnsupportedMode(String),

    #[error("No input provided. Supply a DESMOND, GROMACS or LAMMPS input set.")]
    NoInputProvided,

    #[error("Conflicting inputs: only one of {0:?} may be evaluated per request")]
    ConflictingInputs(Vec<Backend>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit status of the failed external process, if this error came from one.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            EngineError::Invocation { status, .. } => *status,
            _ => None,
        }
    }
}
