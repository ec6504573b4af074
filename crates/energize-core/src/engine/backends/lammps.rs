use super::{Backend, absolute, engine_binary, run_stage};
use crate::engine::config::LammpsConfig;
use crate::engine::error::EngineError;
use crate::engine::invocation::{BackendInvocation, OutputSink, ProcessRunner, StdinSource};
use crate::engine::progress::ProgressReporter;
use phf::{Map, phf_map};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::instrument;

pub const INPUT_FILE: &str = "data.input";
pub const LOG_FILE: &str = "log.lammps";

/// Which conversion produced the LAMMPS case being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LammpsMode {
    Native,
    ConvertedFromGromacs,
    ConvertedFromLammps,
}

static MODE_TAGS: Map<&'static str, LammpsMode> = phf_map! {
    "in" => LammpsMode::Native,
    "GtoL" => LammpsMode::ConvertedFromGromacs,
    "LtoL" => LammpsMode::ConvertedFromLammps,
};

impl LammpsMode {
    pub fn tag(&self) -> &'static str {
        match self {
            LammpsMode::Native => "in",
            LammpsMode::ConvertedFromGromacs => "GtoL",
            LammpsMode::ConvertedFromLammps => "LtoL",
        }
    }

    /// Directory, relative to the configured root, holding one subdirectory
    /// per case.
    pub fn base_dir(&self) -> &'static str {
        match self {
            LammpsMode::Native => "Inputs/Lammps",
            LammpsMode::ConvertedFromGromacs => "Outputs/GromacsToLammps",
            LammpsMode::ConvertedFromLammps => "Outputs/LammpsToLammps",
        }
    }
}

impl FromStr for LammpsMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODE_TAGS
            .get(s)
            .copied()
            .ok_or_else(|| EngineError::UnsupportedMode(s.to_string()))
    }
}

impl fmt::Display for LammpsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

pub fn simulation_dir(root: &Path, mode: LammpsMode, case: &str) -> PathBuf {
    root.join(mode.base_dir()).join(case)
}

/// `lmp < data.input`, with stdout discarded unless `verbose`.
pub fn build_invocation(binary: &Path, sim_dir: &Path, verbose: bool) -> BackendInvocation {
    let stdout = if verbose {
        OutputSink::Inherit
    } else {
        OutputSink::Null
    };
    BackendInvocation::new("run", binary, sim_dir, sim_dir.join(LOG_FILE))
        .stdin(StdinSource::File(sim_dir.join(INPUT_FILE)))
        .stdout(stdout)
}

/// Runs the case directory `<root>/<mode base>/<case>` and returns the path of
/// the `log.lammps` the engine writes there.
#[instrument(skip_all, name = "lammps_invoker", fields(case = case, mode = %mode))]
pub fn run(
    case: &str,
    mode: LammpsMode,
    config: &LammpsConfig,
    runner: &dyn ProcessRunner,
    reporter: &ProgressReporter,
) -> Result<PathBuf, EngineError> {
    if case.is_empty() {
        return Err(EngineError::InvalidInput(
            "LAMMPS case name cannot be empty".to_string(),
        ));
    }
    let sim_dir = absolute(&simulation_dir(&config.root, mode, case))?;
    if !sim_dir.is_dir() {
        return Err(EngineError::InvalidInput(format!(
            "LAMMPS case directory '{}' does not exist",
            sim_dir.display()
        )));
    }
    let input = sim_dir.join(INPUT_FILE);
    if !input.is_file() {
        return Err(EngineError::InvalidInput(format!(
            "LAMMPS input script '{}' does not exist",
            input.display()
        )));
    }

    let binary = engine_binary(&config.bin_dir, &config.binary)?;
    let invocation = build_invocation(&binary, &sim_dir, config.verbose);
    run_stage(runner, reporter, Backend::Lammps, &sim_dir, &invocation)?;

    Ok(sim_dir.join(LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::ScriptedRunner;
    use std::fs;

    fn config(root: &Path, verbose: bool) -> LammpsConfig {
        LammpsConfig {
            bin_dir: PathBuf::new(),
            binary: "lmp_openmpi".to_string(),
            root: root.to_path_buf(),
            verbose,
        }
    }

    fn make_case(root: &Path, mode: LammpsMode, case: &str) -> PathBuf {
        let dir = simulation_dir(root, mode, case);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(INPUT_FILE), "run 0\n").unwrap();
        dir
    }

    #[test]
    fn mode_tags_parse_to_their_base_directories() {
        assert_eq!("in".parse::<LammpsMode>().unwrap().base_dir(), "Inputs/Lammps");
        assert_eq!(
            "GtoL".parse::<LammpsMode>().unwrap().base_dir(),
            "Outputs/GromacsToLammps"
        );
        assert_eq!(
            "LtoL".parse::<LammpsMode>().unwrap().base_dir(),
            "Outputs/LammpsToLammps"
        );
    }

    #[test]
    fn unknown_mode_tag_is_unsupported() {
        let err = "out".parse::<LammpsMode>().unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedMode(ref tag) if tag == "out"));
    }

    #[test]
    fn mode_tag_round_trips_through_display() {
        for mode in [
            LammpsMode::Native,
            LammpsMode::ConvertedFromGromacs,
            LammpsMode::ConvertedFromLammps,
        ] {
            assert_eq!(mode.to_string().parse::<LammpsMode>().unwrap(), mode);
        }
    }

    #[test]
    fn quiet_run_reads_input_file_and_discards_stdout() {
        let inv = build_invocation(Path::new("lmp"), Path::new("/c"), false);
        assert!(inv.args.is_empty());
        assert_eq!(inv.stdin, StdinSource::File(PathBuf::from("/c/data.input")));
        assert_eq!(inv.stdout, OutputSink::Null);
        assert_eq!(inv.artifact, PathBuf::from("/c/log.lammps"));

        let verbose = build_invocation(Path::new("lmp"), Path::new("/c"), true);
        assert_eq!(verbose.stdout, OutputSink::Inherit);
    }

    #[test]
    fn run_executes_inside_case_directory() {
        let root = tempfile::tempdir().unwrap();
        let case_dir = make_case(root.path(), LammpsMode::ConvertedFromGromacs, "ethane");
        let runner = ScriptedRunner::writing_artifacts("E_bond\n1 2 3 4 5 6 7 8\n");

        let log = run(
            "ethane",
            LammpsMode::ConvertedFromGromacs,
            &config(root.path(), false),
            &runner,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(log, case_dir.join(LOG_FILE));
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].working_dir, case_dir);
        assert_eq!(calls[0].program, PathBuf::from("lmp_openmpi"));
    }

    #[test]
    fn missing_case_directory_is_invalid_input() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::exiting_with(0);
        let err = run(
            "absent",
            LammpsMode::Native,
            &config(root.path(), false),
            &runner,
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn missing_input_script_is_invalid_input_naming_it() {
        let root = tempfile::tempdir().unwrap();
        let case_dir = simulation_dir(root.path(), LammpsMode::Native, "ethane");
        fs::create_dir_all(&case_dir).unwrap();
        let runner = ScriptedRunner::exiting_with(0);

        let err = run(
            "ethane",
            LammpsMode::Native,
            &config(root.path(), false),
            &runner,
            &ProgressReporter::new(),
        )
        .unwrap_err();

        match err {
            EngineError::InvalidInput(msg) => assert!(msg.contains("data.input")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn nonzero_exit_names_the_case_directory() {
        let root = tempfile::tempdir().unwrap();
        let case_dir = make_case(root.path(), LammpsMode::Native, "argon");
        let runner = ScriptedRunner::exiting_with(139);

        let err = run(
            "argon",
            LammpsMode::Native,
            &config(root.path(), false),
            &runner,
            &ProgressReporter::new(),
        )
        .unwrap_err();

        match err {
            EngineError::Invocation { input, status, .. } => {
                assert_eq!(input, case_dir);
                assert_eq!(status, Some(139));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
