//! # Core Module
//!
//! Engine-independent building blocks: physical units, the normalized energy
//! report, and readers for each engine's native report file.
//!
//! - **Units** ([`units`]) - Tagged quantities and kJ/mol, kcal/mol, K conversion
//! - **Reports** ([`report`]) - [`report::EnergyTerm`] and the ordered
//!   [`report::EnergyReport`] mapping returned to callers
//! - **Report I/O** ([`io`]) - DESMOND, GROMACS and LAMMPS report readers

pub mod io;
pub mod report;
pub mod units;
