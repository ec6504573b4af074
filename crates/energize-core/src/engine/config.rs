use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_LAMMPS_BINARY: &str = "lmp_openmpi";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesmondConfig {
    /// Directory holding the `desmond` binary. Empty means "search `PATH`".
    pub bin_dir: PathBuf,
    /// The `.cfg` run configuration passed with `-c`.
    pub run_config: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GromacsConfig {
    pub bin_dir: PathBuf,
    /// Appended to every GROMACS binary name, e.g. `_d` for double precision.
    pub suffix: String,
    /// The `.mdp` run-parameter file passed to `grompp`.
    pub run_parameters: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LammpsConfig {
    pub bin_dir: PathBuf,
    pub binary: String,
    /// Directory the per-mode case directories are resolved against.
    pub root: PathBuf,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub desmond: DesmondConfig,
    pub gromacs: GromacsConfig,
    pub lammps: LammpsConfig,
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    desmond_bin_dir: Option<PathBuf>,
    desmond_run_config: Option<PathBuf>,
    gromacs_bin_dir: Option<PathBuf>,
    gromacs_suffix: Option<String>,
    gromacs_run_parameters: Option<PathBuf>,
    lammps_bin_dir: Option<PathBuf>,
    lammps_binary: Option<String>,
    lammps_root: Option<PathBuf>,
    lammps_verbose: bool,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desmond_bin_dir(mut self, path: PathBuf) -> Self {
        self.desmond_bin_dir = Some(path);
        self
    }
    pub fn desmond_run_config(mut self, path: PathBuf) -> Self {
        self.desmond_run_config = Some(path);
        self
    }
    pub fn gromacs_bin_dir(mut self, path: PathBuf) -> Self {
        self.gromacs_bin_dir = Some(path);
        self
    }
    pub fn gromacs_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.gromacs_suffix = Some(suffix.into());
        self
    }
    pub fn gromacs_run_parameters(mut self, path: PathBuf) -> Self {
        self.gromacs_run_parameters = Some(path);
        self
    }
    pub fn lammps_bin_dir(mut self, path: PathBuf) -> Self {
        self.lammps_bin_dir = Some(path);
        self
    }
    pub fn lammps_binary(mut self, name: impl Into<String>) -> Self {
        self.lammps_binary = Some(name.into());
        self
    }
    pub fn lammps_root(mut self, path: PathBuf) -> Self {
        self.lammps_root = Some(path);
        self
    }
    pub fn lammps_verbose(mut self, verbose: bool) -> Self {
        self.lammps_verbose = verbose;
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let desmond = DesmondConfig {
            bin_dir: self.desmond_bin_dir.unwrap_or_default(),
            run_config: self
                .desmond_run_config
                .ok_or(ConfigError::MissingParameter("desmond_run_config"))?,
        };
        let gromacs = GromacsConfig {
            bin_dir: self.gromacs_bin_dir.unwrap_or_default(),
            suffix: self.gromacs_suffix.unwrap_or_default(),
            run_parameters: self
                .gromacs_run_parameters
                .ok_or(ConfigError::MissingParameter("gromacs_run_parameters"))?,
        };
        let lammps = LammpsConfig {
            bin_dir: self.lammps_bin_dir.unwrap_or_default(),
            binary: self
                .lammps_binary
                .unwrap_or_else(|| DEFAULT_LAMMPS_BINARY.to_string()),
            root: self.lammps_root.unwrap_or_else(|| PathBuf::from(".")),
            verbose: self.lammps_verbose,
        };
        Ok(EngineConfig {
            desmond,
            gromacs,
            lammps,
        })
    }
}
