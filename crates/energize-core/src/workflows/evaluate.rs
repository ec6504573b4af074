use crate::core::io::desmond::DesmondEnergyFile;
use crate::core::io::gromacs::GromacsEnergyFile;
use crate::core::io::lammps::LammpsLogFile;
use crate::core::report::EnergyReport;
use crate::engine::backends::lammps::LammpsMode;
use crate::engine::backends::{self, Backend, read_report};
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::invocation::ProcessRunner;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The one engine input set an evaluation runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSelection {
    Desmond {
        system: PathBuf,
    },
    Gromacs {
        topology: PathBuf,
        coordinates: PathBuf,
    },
    Lammps {
        case: String,
        mode: LammpsMode,
    },
}

impl EngineSelection {
    /// Pairs two GROMACS files by extension: `.top` is the topology and `.gro`
    /// the coordinates, in either order.
    pub fn gromacs_from_pair(a: PathBuf, b: PathBuf) -> Result<Self, EngineError> {
        let is_ext = |p: &Path, ext: &str| p.extension().is_some_and(|e| e == ext);
        let (topology, coordinates) = match (a, b) {
            (top, gro) if is_ext(&top, "top") && is_ext(&gro, "gro") => (top, gro),
            (gro, top) if is_ext(&top, "top") && is_ext(&gro, "gro") => (top, gro),
            (a, b) => {
                return Err(EngineError::InvalidInput(format!(
                    "GROMACS input needs one .top and one .gro file, got '{}' and '{}'",
                    a.display(),
                    b.display()
                )));
            }
        };
        Ok(EngineSelection::Gromacs {
            topology,
            coordinates,
        })
    }

    pub fn backend(&self) -> Backend {
        match self {
            EngineSelection::Desmond { .. } => Backend::Desmond,
            EngineSelection::Gromacs { .. } => Backend::Gromacs,
            EngineSelection::Lammps { .. } => Backend::Lammps,
        }
    }
}

/// Optional input sets as a caller collects them; at most one may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub desmond: Option<PathBuf>,
    pub gromacs: Option<(PathBuf, PathBuf)>,
    pub lammps: Option<(String, LammpsMode)>,
}

impl EvaluationRequest {
    pub fn selection(self) -> Result<EngineSelection, EngineError> {
        let supplied: Vec<Backend> = [
            self.desmond.as_ref().map(|_| Backend::Desmond),
            self.gromacs.as_ref().map(|_| Backend::Gromacs),
            self.lammps.as_ref().map(|_| Backend::Lammps),
        ]
        .into_iter()
        .flatten()
        .collect();
        if supplied.len() > 1 {
            return Err(EngineError::ConflictingInputs(supplied));
        }

        if let Some(system) = self.desmond {
            Ok(EngineSelection::Desmond { system })
        } else if let Some((a, b)) = self.gromacs {
            EngineSelection::gromacs_from_pair(a, b)
        } else if let Some((case, mode)) = self.lammps {
            Ok(EngineSelection::Lammps { case, mode })
        } else {
            Err(EngineError::NoInputProvided)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub backend: Backend,
    pub report: EnergyReport,
    /// The raw engine report the energies were read from.
    pub report_path: PathBuf,
}

/// Runs the engine named by `selection` and parses its report.
#[instrument(skip_all, name = "evaluation_workflow", fields(backend = %selection.backend()))]
pub fn run(
    selection: &EngineSelection,
    config: &EngineConfig,
    runner: &dyn ProcessRunner,
    reporter: &ProgressReporter,
) -> Result<Evaluation, EngineError> {
    let backend = selection.backend();
    info!("Evaluating energy with {}.", backend);

    let (report_path, report) = match selection {
        EngineSelection::Desmond { system } => {
            let path = backends::desmond::run(system, &config.desmond, runner, reporter)?;
            let report = read_report::<DesmondEnergyFile>(&path)?;
            (path, report)
        }
        EngineSelection::Gromacs {
            topology,
            coordinates,
        } => {
            let path =
                backends::gromacs::run(topology, coordinates, &config.gromacs, runner, reporter)?;
            let report = read_report::<GromacsEnergyFile>(&path)?;
            (path, report)
        }
        EngineSelection::Lammps { case, mode } => {
            let path = backends::lammps::run(case, *mode, &config.lammps, runner, reporter)?;
            let report = read_report::<LammpsLogFile>(&path)?;
            (path, report)
        }
    };

    reporter.report(Progress::ReportParsed {
        terms: report.len(),
    });
    info!(
        "Parsed {} energy term(s) from {:?}.",
        report.len(),
        report_path
    );

    Ok(Evaluation {
        backend,
        report,
        report_path,
    })
}

/// Resolves `request` to a single selection, then evaluates it.
pub fn run_request(
    request: EvaluationRequest,
    config: &EngineConfig,
    runner: &dyn ProcessRunner,
    reporter: &ProgressReporter,
) -> Result<Evaluation, EngineError> {
    let selection = request.selection()?;
    run(&selection, config, runner, reporter)
}
