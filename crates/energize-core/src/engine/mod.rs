//! # Engine Module
//!
//! This module drives the external simulation engines. It owns everything that
//! touches processes and the filesystem around a run, leaving report parsing
//! to [`crate::core::io`].
//!
//! ## Architecture
//!
//! - **Invocation** ([`invocation`]) - A structured description of one engine
//!   run (program, argument list, working directory, stdin/stdout wiring) and
//!   the [`invocation::ProcessRunner`] seam that executes it
//! - **Backends** ([`backends`]) - The fixed command sequences of DESMOND,
//!   GROMACS and LAMMPS, including the DESMOND report cache
//! - **Configuration** ([`config`]) - Binary locations and run-parameter files
//! - **Progress Monitoring** ([`progress`]) - Stage start/finish events for
//!   front ends
//! - **Error Handling** ([`error`]) - The error type surfaced to callers
//!
//! Child processes receive their working directory explicitly, so the
//! caller's current directory is the same before and after every evaluation,
//! whether it succeeds or fails.

pub mod backends;
pub mod config;
pub mod error;
pub mod invocation;
pub mod progress;
#[cfg(test)]
pub(crate) mod testing;
