//! Readers for the energy reports written by the supported simulation engines.
//!
//! Each engine leaves a differently shaped text file behind. The readers here
//! share the [`traits::ReportFormat`] interface and all validate the structure
//! they expect (marker lines, value counts) before attaching term names, so a
//! change in an engine's output layout fails loudly instead of mislabeling
//! energies.

pub mod desmond;
pub mod error;
pub mod gromacs;
pub mod lammps;
pub mod traits;

pub use error::{ReportError, ReportParseErrorKind};
