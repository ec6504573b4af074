use super::error::{ReportError, ReportParseErrorKind};
use crate::core::report::EnergyReport;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A backend-native text report that can be turned into an [`EnergyReport`].
pub trait ReportFormat {
    /// Human-readable name of the engine that writes this format.
    const ENGINE: &'static str;

    /// Parses a report from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Parse`] if the expected marker or data line is
    /// missing or malformed, and [`ReportError::Io`] if reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<EnergyReport, ReportError>;

    /// Parses the report stored at `path`.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<EnergyReport, ReportError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Parses a whitespace-delimited token as `f64`.
pub(crate) fn parse_number(token: &str) -> Result<f64, ReportParseErrorKind> {
    token
        .parse::<f64>()
        .map_err(|_| ReportParseErrorKind::InvalidNumber(token.to_string()))
}
