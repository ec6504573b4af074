//! One invoker per supported engine.
//!
//! Invokers resolve input paths, build the engine's fixed command sequence,
//! run each stage through a [`ProcessRunner`] and return the path of the
//! report artifact the matching reader in [`crate::core::io`] consumes. Any
//! nonzero exit is fatal; nothing is retried.

pub mod desmond;
pub mod gromacs;
pub mod lammps;

use crate::core::io::traits::ReportFormat;
use crate::core::report::EnergyReport;
use crate::engine::error::EngineError;
use crate::engine::invocation::{BackendInvocation, ProcessRunner};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Desmond,
    Gromacs,
    Lammps,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Desmond => "DESMOND",
            Backend::Gromacs => "GROMACS",
            Backend::Lammps => "LAMMPS",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs one stage and turns a nonzero exit into [`EngineError::Invocation`]
/// attributed to `input`.
pub(crate) fn run_stage(
    runner: &dyn ProcessRunner,
    reporter: &ProgressReporter,
    backend: Backend,
    input: &Path,
    invocation: &BackendInvocation,
) -> Result<(), EngineError> {
    info!("Running {} {} stage: {}", backend, invocation.stage, invocation);
    debug!("Working directory: {:?}", invocation.working_dir);
    reporter.report(Progress::StageStart {
        backend,
        stage: invocation.stage,
    });

    let outcome = runner.run(invocation).map_err(|source| {
        reporter.report(Progress::StageFinish { success: false });
        EngineError::Spawn {
            program: invocation.program.clone(),
            source,
        }
    })?;
    reporter.report(Progress::StageFinish {
        success: outcome.success(),
    });

    if !outcome.success() {
        return Err(EngineError::Invocation {
            backend,
            stage: invocation.stage,
            input: input.to_path_buf(),
            status: outcome.code,
        });
    }
    Ok(())
}

/// Location of an engine executable. An empty `bin_dir` leaves the bare name
/// for a `PATH` lookup; otherwise the result is absolute so it does not depend
/// on the child's working directory.
pub(crate) fn engine_binary(bin_dir: &Path, name: &str) -> Result<PathBuf, EngineError> {
    if bin_dir.as_os_str().is_empty() {
        return Ok(PathBuf::from(name));
    }
    absolute(&bin_dir.join(name))
}

pub(crate) fn absolute(path: &Path) -> Result<PathBuf, EngineError> {
    std::path::absolute(path).map_err(|e| EngineError::io(path, e))
}

/// Directory containing `file`, which must already be absolute.
pub(crate) fn parent_dir(file: &Path) -> Result<PathBuf, EngineError> {
    file.parent().map(Path::to_path_buf).ok_or_else(|| {
        EngineError::InvalidInput(format!("'{}' has no parent directory", file.display()))
    })
}

pub(crate) fn read_report<F: ReportFormat>(path: &Path) -> Result<EnergyReport, EngineError> {
    debug!("Parsing {} report {:?}", F::ENGINE, path);
    F::read_from_path(path).map_err(|source| EngineError::Report {
        path: path.to_path_buf(),
        source,
    })
}
