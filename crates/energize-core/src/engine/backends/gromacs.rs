use super::{Backend, absolute, engine_binary, parent_dir, run_stage};
use crate::core::io::gromacs::EXPECTED_VALUES;
use crate::engine::config::GromacsConfig;
use crate::engine::error::EngineError;
use crate::engine::invocation::{BackendInvocation, ProcessRunner, StdinSource};
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Non-fatal `grompp` warnings tolerated before preprocessing aborts.
pub const MAX_WARNINGS: u32 = 1;

/// Files produced by the three GROMACS stages, all beside the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GromacsArtifacts {
    pub run_input: PathBuf,
    pub processed_parameters: PathBuf,
    pub trajectory: PathBuf,
    pub checkpoint: PathBuf,
    pub final_configuration: PathBuf,
    pub energy_trace: PathBuf,
    pub log: PathBuf,
    pub energy_table: PathBuf,
}

impl GromacsArtifacts {
    pub fn beside(dir: &Path) -> Self {
        Self {
            run_input: dir.join("topol.tpr"),
            processed_parameters: dir.join("mdout.mdp"),
            trajectory: dir.join("traj.trr"),
            checkpoint: dir.join("state.cpt"),
            final_configuration: dir.join("confout.gro"),
            energy_trace: dir.join("ener.edr"),
            log: dir.join("md.log"),
            energy_table: dir.join("energy.xvg"),
        }
    }
}

/// Interactive `g_energy` answer: terms 1 through 14, then 0 to stop.
pub fn energy_selection() -> String {
    let terms: Vec<String> = (1..=EXPECTED_VALUES).map(|i| i.to_string()).collect();
    format!("{} 0\n", terms.join(" "))
}

pub struct GromacsInputs<'a> {
    pub topology: &'a Path,
    pub coordinates: &'a Path,
    pub run_parameters: &'a Path,
}

/// Builds the preprocess, run and extraction stages in execution order.
pub fn build_invocations(
    bin_dir: &Path,
    suffix: &str,
    inputs: &GromacsInputs,
    artifacts: &GromacsArtifacts,
    work_dir: &Path,
) -> Result<[BackendInvocation; 3], EngineError> {
    let grompp = engine_binary(bin_dir, &format!("grompp{}", suffix))?;
    let mdrun = engine_binary(bin_dir, &format!("mdrun{}", suffix))?;
    let g_energy = engine_binary(bin_dir, &format!("g_energy{}", suffix))?;

    let preprocess = BackendInvocation::new("grompp", grompp, work_dir, &artifacts.run_input)
        .flag_path("-f", inputs.run_parameters)
        .flag_path("-c", inputs.coordinates)
        .flag_path("-p", inputs.topology)
        .flag_path("-o", &artifacts.run_input)
        .flag_path("-po", &artifacts.processed_parameters)
        .arg("-maxwarn")
        .arg(MAX_WARNINGS.to_string());

    let md = BackendInvocation::new("mdrun", mdrun, work_dir, &artifacts.energy_trace)
        .flag_path("-s", &artifacts.run_input)
        .flag_path("-o", &artifacts.trajectory)
        .flag_path("-cpo", &artifacts.checkpoint)
        .flag_path("-c", &artifacts.final_configuration)
        .flag_path("-e", &artifacts.energy_trace)
        .flag_path("-g", &artifacts.log);

    let extract = BackendInvocation::new("g_energy", g_energy, work_dir, &artifacts.energy_table)
        .flag_path("-f", &artifacts.energy_trace)
        .flag_path("-o", &artifacts.energy_table)
        .arg("-dp")
        .stdin(StdinSource::Text(energy_selection()));

    Ok([preprocess, md, extract])
}

/// Runs grompp, mdrun and g_energy in turn and returns the path of
/// `energy.xvg`. The first failing stage aborts the evaluation.
#[instrument(skip_all, name = "gromacs_invoker", fields(topology = %topology.display()))]
pub fn run(
    topology: &Path,
    coordinates: &Path,
    config: &GromacsConfig,
    runner: &dyn ProcessRunner,
    reporter: &ProgressReporter,
) -> Result<PathBuf, EngineError> {
    let topology = absolute(topology)?;
    let coordinates = absolute(coordinates)?;
    let run_parameters = absolute(&config.run_parameters)?;
    let work_dir = parent_dir(&topology)?;
    let artifacts = GromacsArtifacts::beside(&work_dir);

    let inputs = GromacsInputs {
        topology: &topology,
        coordinates: &coordinates,
        run_parameters: &run_parameters,
    };
    let stages = build_invocations(
        &config.bin_dir,
        &config.suffix,
        &inputs,
        &artifacts,
        &work_dir,
    )?;

    for stage in &stages {
        run_stage(runner, reporter, Backend::Gromacs, &topology, stage)?;
    }
    info!("GROMACS energies extracted to {:?}", artifacts.energy_table);

    Ok(artifacts.energy_table)
}
