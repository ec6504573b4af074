use energize::engine::backends::lammps::LammpsMode;
use energize::engine::config::DEFAULT_LAMMPS_BINARY;

/// Values used when neither the command line nor a config file sets them.
pub struct DefaultsConfig {
    pub desmond_run_config: String,
    pub gromacs_run_parameters: String,
    pub gromacs_suffix: String,
    pub lammps_binary: String,
    pub lammps_root: String,
    pub lammps_mode: LammpsMode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            desmond_run_config: "Inputs/Desmond/onepoint.cfg".to_string(),
            gromacs_run_parameters: "Inputs/Gromacs/grompp.mdp".to_string(),
            gromacs_suffix: String::new(),
            lammps_binary: DEFAULT_LAMMPS_BINARY.to_string(),
            lammps_root: ".".to_string(),
            lammps_mode: LammpsMode::Native,
        }
    }
}
