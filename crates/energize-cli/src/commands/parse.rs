use crate::cli::{ParseArgs, ReportKind};
use crate::display::render_report;
use crate::error::{CliError, Result};
use energize::core::io::desmond::DesmondEnergyFile;
use energize::core::io::gromacs::GromacsEnergyFile;
use energize::core::io::lammps::LammpsLogFile;
use energize::core::io::traits::ReportFormat;
use energize::core::report::EnergyReport;
use energize::core::units::Unit;
use std::path::Path;
use tracing::info;

fn read(kind: ReportKind, path: &Path) -> Result<EnergyReport> {
    let result = match kind {
        ReportKind::Desmond => DesmondEnergyFile::read_from_path(path),
        ReportKind::Gromacs => GromacsEnergyFile::read_from_path(path),
        ReportKind::Lammps => LammpsLogFile::read_from_path(path),
    };
    result.map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn run(args: ParseArgs, cli_units: Option<Unit>) -> Result<()> {
    info!("Reading {:?} report {:?}.", args.format, args.path);
    let report = read(args.format, &args.path)?;
    print!("{}", render_report(&args.path, &report, cli_units)?);
    Ok(())
}
