use super::error::{ReportError, ReportParseErrorKind};
use super::traits::{ReportFormat, parse_number};
use crate::core::report::{EnergyReport, EnergyTerm};
use crate::core::units::{Quantity, Unit};
use std::io::BufRead;

/// Energy terms extracted by `g_energy`, in selection order. Every entry is in
/// kJ/mol; the temperature column follows them.
pub const ENERGY_TERMS: [&str; 13] = [
    "Bond",
    "Angle",
    "Proper Dih.",
    "Ryckaert-Bell.",
    "LJ-14",
    "Coulomb-14",
    "LJ (SR)",
    "Disper. corr.",
    "Coulomb (SR)",
    "Coul. recip.",
    "Potential",
    "Kinetic En.",
    "Total Energy",
];

pub const TEMPERATURE: &str = "Temperature";

/// Number of values following the time column on an `energy.xvg` data line.
pub const EXPECTED_VALUES: usize = ENERGY_TERMS.len() + 1;

/// The `energy.xvg` table written by `g_energy`.
///
/// Lines starting with `#` or `@` are xvgr headers. The last data line holds
/// the energies of the final frame, preceded by its time stamp.
pub struct GromacsEnergyFile;

fn is_data_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with('@')
}

impl ReportFormat for GromacsEnergyFile {
    const ENGINE: &'static str = "GROMACS";

    fn read_from(reader: &mut impl BufRead) -> Result<EnergyReport, ReportError> {
        let mut last_data: Option<(usize, String)> = None;
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if is_data_line(&line) {
                last_data = Some((line_num + 1, line));
            }
        }

        let (line_num, line) = last_data.ok_or_else(|| {
            ReportError::structural(ReportParseErrorKind::MissingDataLine("in energy table"))
        })?;

        // First column is the frame time.
        let tokens: Vec<&str> = line.split_whitespace().skip(1).collect();
        if tokens.len() != EXPECTED_VALUES {
            return Err(ReportError::at_line(
                line_num,
                ReportParseErrorKind::TermCountMismatch {
                    expected: EXPECTED_VALUES,
                    found: tokens.len(),
                },
            ));
        }

        let values = tokens
            .iter()
            .map(|t| parse_number(t))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|kind| ReportError::at_line(line_num, kind))?;

        let (energies, temperature) = values.split_at(ENERGY_TERMS.len());
        let mut report =
            EnergyReport::from_positional(&ENERGY_TERMS, energies, Unit::KilojoulesPerMole);
        report.insert(EnergyTerm::new(TEMPERATURE, Quantity::kelvin(temperature[0])));
        Ok(report)
    }
}
