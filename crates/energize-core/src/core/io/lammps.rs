use super::error::{ReportError, ReportParseErrorKind};
use super::traits::{ReportFormat, parse_number};
use crate::core::report::EnergyReport;
use crate::core::units::Unit;
use std::io::BufRead;

pub const HEADER_MARKER: &str = "E_bond";

/// Thermo columns following the `E_bond` header, all in kcal/mol.
pub const ENERGY_TERMS: [&str; 8] = [
    "Bond",
    "Angle",
    "Proper Dih.",
    "Improper",
    "Pairs",
    "vdW",
    "Coulomb",
    "Potential",
];

/// The `log.lammps` file written by a LAMMPS run.
///
/// The thermo header carrying `E_bond` is followed by the step-zero values.
pub struct LammpsLogFile;

impl ReportFormat for LammpsLogFile {
    const ENGINE: &'static str = "LAMMPS";

    fn read_from(reader: &mut impl BufRead) -> Result<EnergyReport, ReportError> {
        let mut lines = reader.lines().enumerate();

        let mut found_header = false;
        for (_, line_res) in lines.by_ref() {
            if line_res?.contains(HEADER_MARKER) {
                found_header = true;
                break;
            }
        }
        if !found_header {
            return Err(ReportError::structural(
                ReportParseErrorKind::MissingMarker(HEADER_MARKER),
            ));
        }

        let (line_num, line) = match lines.next() {
            Some((idx, line_res)) => (idx + 1, line_res?),
            None => {
                return Err(ReportError::structural(
                    ReportParseErrorKind::MissingDataLine("after the thermo header"),
                ));
            }
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != ENERGY_TERMS.len() {
            return Err(ReportError::at_line(
                line_num,
                ReportParseErrorKind::TermCountMismatch {
                    expected: ENERGY_TERMS.len(),
                    found: tokens.len(),
                },
            ));
        }

        let values = tokens
            .iter()
            .map(|t| parse_number(t))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|kind| ReportError::at_line(line_num, kind))?;

        Ok(EnergyReport::from_positional(
            &ENERGY_TERMS,
            &values,
            Unit::KilocaloriesPerMole,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::Quantity;
    use std::io::Cursor;

    const LOG: &str = "\
LAMMPS (29 Oct 2020)
thermo_style custom ebond eangle edihed eimp epair evdwl ecoul pe
run 0
Step E_bond E_angle
E_bond E_angle E_dihed E_impro E_pair E_vdwl E_coul PotEng
   1.5 2.5 3.5 4.5 5.5 6.5 7.5 37.5
Loop time of 1.2e-05 on 1 procs
";

    fn parse(content: &str) -> Result<EnergyReport, ReportError> {
        LammpsLogFile::read_from(&mut Cursor::new(content.as_bytes()))
    }

    #[test]
    fn values_after_header_map_onto_fixed_vocabulary() {
        let log = "E_bond E_angle E_dihed E_impro E_pair E_vdwl E_coul PotEng\n\
                   1 2 3 4 5 6 7 28\n";
        let report = parse(log).unwrap();
        assert_eq!(report.len(), 8);
        let names: Vec<_> = report.names().collect();
        assert_eq!(names, ENERGY_TERMS.to_vec());
        for term in &report {
            assert_eq!(term.quantity().unit(), Unit::KilocaloriesPerMole);
        }
        assert_eq!(report.potential(), Some(Quantity::kcal_per_mol(28.0)));
        assert_eq!(report.quantity("vdW"), Some(Quantity::kcal_per_mol(6.0)));
    }

    #[test]
    fn only_first_header_occurrence_is_used() {
        let log = "Step E_bond E_angle E_dihed E_impro E_pair E_vdwl E_coul PotEng\n\
                   9 9 9 9 9 9 9 9 9\n";
        // Nine tokens: the step column makes this line unusable.
        assert!(parse(log).is_err());

        // The echoed header row after the first match is not numeric.
        let err = parse(LOG).unwrap_err();
        assert!(matches!(
            err.kind(),
            Some(ReportParseErrorKind::InvalidNumber(t)) if t == "E_bond"
        ));
    }

    #[test]
    fn data_line_after_first_header_line_is_parsed() {
        let log = LOG.replace("Step E_bond E_angle\n", "");
        let report = parse(&log).unwrap();
        assert_eq!(report.quantity("Bond"), Some(Quantity::kcal_per_mol(1.5)));
        assert_eq!(report.potential(), Some(Quantity::kcal_per_mol(37.5)));
    }

    #[test]
    fn missing_header_is_a_parse_error() {
        let err = parse("LAMMPS (29 Oct 2020)\nLoop time\n").unwrap_err();
        assert!(matches!(
            err.kind(),
            Some(ReportParseErrorKind::MissingMarker("E_bond"))
        ));
    }

    #[test]
    fn header_on_last_line_has_no_data() {
        let err = parse("E_bond E_angle\n").unwrap_err();
        assert!(matches!(
            err.kind(),
            Some(ReportParseErrorKind::MissingDataLine(_))
        ));
    }

    #[test]
    fn non_numeric_token_is_a_parse_error() {
        let err = parse("E_bond\n1 2 3 4 5 6 7 x\n").unwrap_err();
        match err {
            ReportError::Parse { line, kind } => {
                assert_eq!(line, Some(2));
                assert_eq!(kind, ReportParseErrorKind::InvalidNumber("x".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
