use crate::error::{CliError, Result};
use energize::core::report::EnergyReport;
use energize::core::units::Unit;
use std::path::Path;

const VALUE_PRECISION: usize = 4;

/// Formats a report as `Energy from <source>:` followed by one aligned
/// `name value unit` line per term, converted to `units` when given.
pub fn render_report(source: &Path, report: &EnergyReport, units: Option<Unit>) -> Result<String> {
    let converted;
    let report = match units {
        Some(unit) => {
            converted = report
                .to_energy_unit(unit)
                .map_err(|e| CliError::Argument(e.to_string()))?;
            &converted
        }
        None => report,
    };

    let name_width = report.names().map(str::len).max().unwrap_or(0);
    let mut out = format!("Energy from {}:\n", source.display());
    for term in report {
        let quantity = term.quantity();
        out.push_str(&format!(
            "  {:<name_width$}  {:>16.prec$} {}\n",
            term.name(),
            quantity.magnitude(),
            quantity.unit(),
            prec = VALUE_PRECISION,
        ));
    }
    Ok(out)
}
