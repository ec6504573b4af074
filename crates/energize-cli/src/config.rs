pub mod defaults;

use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use energize::core::units::Unit;
use energize::engine::backends::lammps::LammpsMode;
use energize::engine::config::{EngineConfig, EngineConfigBuilder};
use energize::workflows::evaluate::EvaluationRequest;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDesmondConfig {
    #[serde(rename = "bin-dir")]
    bin_dir: Option<PathBuf>,
    #[serde(rename = "run-config")]
    run_config: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGromacsConfig {
    #[serde(rename = "bin-dir")]
    bin_dir: Option<PathBuf>,
    suffix: Option<String>,
    #[serde(rename = "run-parameters")]
    run_parameters: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLammpsConfig {
    #[serde(rename = "bin-dir")]
    bin_dir: Option<PathBuf>,
    binary: Option<String>,
    root: Option<PathBuf>,
    mode: Option<String>,
    verbose: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    units: Option<Unit>,
}

/// Settings as read from a TOML file; every field may be absent.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEvaluationConfig {
    desmond: Option<PartialDesmondConfig>,
    gromacs: Option<PartialGromacsConfig>,
    lammps: Option<PartialLammpsConfig>,
    output: Option<PartialOutputConfig>,
}

/// Everything the `evaluate` command needs once all sources are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSettings {
    pub request: EvaluationRequest,
    pub engine: EngineConfig,
    pub display_units: Option<Unit>,
}

impl PartialEvaluationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges with command-line values. Precedence is command line, then
    /// `--set`, then file, then built-in defaults.
    pub fn merge_with_cli(
        mut self,
        args: &EvaluateArgs,
        cli_units: Option<Unit>,
    ) -> Result<EvaluationSettings> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let desmond = self.desmond.take().unwrap_or_default();
        let gromacs = self.gromacs.take().unwrap_or_default();
        let lammps = self.lammps.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let mut builder = EngineConfigBuilder::new()
            .desmond_run_config(
                args.cfg
                    .clone()
                    .or(desmond.run_config)
                    .unwrap_or_else(|| PathBuf::from(&defaults.desmond_run_config)),
            )
            .gromacs_run_parameters(
                args.mdp
                    .clone()
                    .or(gromacs.run_parameters)
                    .unwrap_or_else(|| PathBuf::from(&defaults.gromacs_run_parameters)),
            )
            .gromacs_suffix(
                args.grosuff
                    .clone()
                    .or(gromacs.suffix)
                    .unwrap_or(defaults.gromacs_suffix),
            )
            .lammps_binary(
                args.lmpbin
                    .clone()
                    .or(lammps.binary)
                    .unwrap_or(defaults.lammps_binary),
            )
            .lammps_root(
                args.lmp_root
                    .clone()
                    .or(lammps.root)
                    .unwrap_or_else(|| PathBuf::from(&defaults.lammps_root)),
            )
            .lammps_verbose(args.lmp_verbose.or(lammps.verbose).unwrap_or(false));

        if let Some(dir) = args.despath.clone().or(desmond.bin_dir) {
            builder = builder.desmond_bin_dir(dir);
        }
        if let Some(dir) = args.gropath.clone().or(gromacs.bin_dir) {
            builder = builder.gromacs_bin_dir(dir);
        }
        if let Some(dir) = args.lmppath.clone().or(lammps.bin_dir) {
            builder = builder.lammps_bin_dir(dir);
        }

        let engine = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        // The mode only matters, and is only validated, for a LAMMPS run.
        let lammps_input = match &args.inputs.lmp_in {
            Some(case) => {
                let mode = match args.lmp_mode.as_deref().or(lammps.mode.as_deref()) {
                    Some(tag) => tag.parse::<LammpsMode>()?,
                    None => defaults.lammps_mode,
                };
                Some((case.clone(), mode))
            }
            None => None,
        };

        let gromacs_input = match args.inputs.gro_in.as_deref() {
            Some([a, b]) => Some((a.clone(), b.clone())),
            Some(other) => {
                return Err(CliError::Argument(format!(
                    "--gro-in expects exactly two files, got {}",
                    other.len()
                )));
            }
            None => None,
        };

        let request = EvaluationRequest {
            desmond: args.inputs.des_in.clone(),
            gromacs: gromacs_input,
            lammps: lammps_input,
        };

        Ok(EvaluationSettings {
            request,
            engine,
            display_units: cli_units.or(output.units),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "desmond.bin-dir" => {
                    self.desmond.get_or_insert_with(Default::default).bin_dir =
                        Some(PathBuf::from(value_str));
                }
                "desmond.run-config" => {
                    self.desmond.get_or_insert_with(Default::default).run_config =
                        Some(PathBuf::from(value_str));
                }
                "gromacs.bin-dir" => {
                    self.gromacs.get_or_insert_with(Default::default).bin_dir =
                        Some(PathBuf::from(value_str));
                }
                "gromacs.suffix" => {
                    self.gromacs.get_or_insert_with(Default::default).suffix =
                        Some(value_str.to_string());
                }
                "gromacs.run-parameters" => {
                    self.gromacs
                        .get_or_insert_with(Default::default)
                        .run_parameters = Some(PathBuf::from(value_str));
                }
                "lammps.bin-dir" => {
                    self.lammps.get_or_insert_with(Default::default).bin_dir =
                        Some(PathBuf::from(value_str));
                }
                "lammps.binary" => {
                    self.lammps.get_or_insert_with(Default::default).binary =
                        Some(value_str.to_string());
                }
                "lammps.root" => {
                    self.lammps.get_or_insert_with(Default::default).root =
                        Some(PathBuf::from(value_str));
                }
                "lammps.mode" => {
                    self.lammps.get_or_insert_with(Default::default).mode =
                        Some(value_str.to_string());
                }
                "lammps.verbose" => {
                    self.lammps.get_or_insert_with(Default::default).verbose =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid boolean value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "output.units" => {
                    self.output.get_or_insert_with(Default::default).units =
                        Some(value_str.parse().map_err(|e| {
                            CliError::Config(format!("Invalid value for {}: {}", key, e))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Loads the optional config file named in `args` and merges it.
pub fn resolve(args: &EvaluateArgs, cli_units: Option<Unit>) -> Result<EvaluationSettings> {
    let partial = match &args.config {
        Some(path) => PartialEvaluationConfig::from_file(path)?,
        None => PartialEvaluationConfig::default(),
    };
    partial.merge_with_cli(args, cli_units)
}
