use clap::{Args, Parser, Subcommand, ValueEnum};
use energize::core::units::Unit;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "energize - Evaluate the energy of a molecular configuration with DESMOND, GROMACS or LAMMPS and report each term with its units.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print energies in this unit ('kJ/mol' or 'kcal/mol') instead of the engine's own.
    #[arg(short, long, global = true, value_name = "UNIT")]
    pub units: Option<Unit>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an engine on a configuration and print its energy terms.
    Evaluate(EvaluateArgs),
    /// Parse an existing engine report without running anything.
    Parse(ParseArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub inputs: InputSelection,

    /// Path to a TOML configuration file with engine locations and run files.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- DESMOND ---
    /// Input .cfg run configuration (for DESMOND).
    #[arg(long, value_name = "PATH")]
    pub cfg: Option<PathBuf>,

    /// Directory holding the DESMOND binary.
    #[arg(short = 'd', long, value_name = "PATH")]
    pub despath: Option<PathBuf>,

    // --- GROMACS ---
    /// Input .mdp run-parameter file (for GROMACS).
    #[arg(long, value_name = "PATH")]
    pub mdp: Option<PathBuf>,

    /// Directory holding the GROMACS binaries.
    #[arg(short = 'g', long, value_name = "PATH")]
    pub gropath: Option<PathBuf>,

    /// Suffix of the GROMACS binaries, e.g. '_d' for double precision builds.
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub grosuff: Option<String>,

    // --- LAMMPS ---
    /// Directory holding the LAMMPS binary.
    #[arg(short = 'l', long, value_name = "PATH")]
    pub lmppath: Option<PathBuf>,

    /// Name of the LAMMPS binary.
    #[arg(long, value_name = "NAME")]
    pub lmpbin: Option<String>,

    /// Which case directory layout to use: 'in', 'GtoL' or 'LtoL'.
    #[arg(long, value_name = "TAG")]
    pub lmp_mode: Option<String>,

    /// Directory the LAMMPS case layouts are resolved against.
    #[arg(long, value_name = "PATH")]
    pub lmp_root: Option<PathBuf>,

    /// Show LAMMPS console output instead of discarding it. Pass
    /// `--lmp-verbose=false` to silence a config file that enables it.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub lmp_verbose: Option<bool>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S gromacs.suffix=_d
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// The mutually exclusive engine input sets.
#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct InputSelection {
    /// .cms file to evaluate with DESMOND.
    #[arg(long, value_name = "CMS")]
    pub des_in: Option<PathBuf>,

    /// .gro and .top files to evaluate with GROMACS, in either order.
    #[arg(long, num_args = 2, value_names = ["GRO", "TOP"])]
    pub gro_in: Option<Vec<PathBuf>>,

    /// LAMMPS case name to evaluate.
    #[arg(long, value_name = "CASE")]
    pub lmp_in: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// A DESMOND `system.enegrp.dat` file.
    Desmond,
    /// A GROMACS `energy.xvg` table.
    Gromacs,
    /// A `log.lammps` file.
    Lammps,
}

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Engine that wrote the report.
    #[arg(short, long, value_enum)]
    pub format: ReportKind,

    /// Path to the report file.
    #[arg(required = true, value_name = "PATH")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn gromacs_input_takes_two_files() {
        let cli = Cli::parse_from(["energize", "evaluate", "--gro-in", "a.gro", "a.top"]);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(
            args.inputs.gro_in,
            Some(vec![PathBuf::from("a.gro"), PathBuf::from("a.top")])
        );
    }

    #[test]
    fn input_sets_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "energize", "evaluate", "--des-in", "a.cms", "--lmp-in", "ethane",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn units_flag_is_parsed_into_unit() {
        let cli = Cli::parse_from([
            "energize",
            "parse",
            "--format",
            "lammps",
            "log.lammps",
            "--units",
            "kJ/mol",
        ]);
        assert_eq!(cli.units, Some(Unit::KilojoulesPerMole));
    }

    #[test]
    fn gromacs_suffix_may_start_with_underscore_or_hyphen() {
        let cli = Cli::parse_from(["energize", "evaluate", "--grosuff", "_d"]);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.grosuff.as_deref(), Some("_d"));
    }
}
