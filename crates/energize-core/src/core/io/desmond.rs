use super::error::{ReportError, ReportParseErrorKind};
use super::traits::{ReportFormat, parse_number};
use crate::core::report::{EnergyReport, EnergyTerm, TOTAL_ENERGY};
use crate::core::units::Quantity;
use std::io::BufRead;

const TOTAL_MARKER: &str = "Total";

/// The `<job>.enegrp.dat` energy-group file written by DESMOND.
///
/// Only the total energy is extracted: the first line mentioning `Total` is
/// authoritative and its last column holds the value in kcal/mol.
pub struct DesmondEnergyFile;

impl ReportFormat for DesmondEnergyFile {
    const ENGINE: &'static str = "DESMOND";

    fn read_from(reader: &mut impl BufRead) -> Result<EnergyReport, ReportError> {
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if !line.contains(TOTAL_MARKER) {
                continue;
            }

            let token = line.split_whitespace().last().unwrap_or_default();
            let total =
                parse_number(token).map_err(|kind| ReportError::at_line(line_num + 1, kind))?;

            let mut report = EnergyReport::new();
            report.insert(EnergyTerm::new(TOTAL_ENERGY, Quantity::kcal_per_mol(total)));
            return Ok(report);
        }

        Err(ReportError::structural(ReportParseErrorKind::MissingMarker(
            TOTAL_MARKER,
        )))
    }
}
