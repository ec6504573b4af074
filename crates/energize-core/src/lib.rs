//! # energize
//!
//! Evaluates the potential energy of a molecular-simulation configuration by
//! delegating to an external engine (DESMOND, GROMACS or LAMMPS) and returns an
//! engine-agnostic, unit-tagged breakdown of the energy terms it reported.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Units, the [`core::report::EnergyReport`]
//!   data model and the per-engine report readers. No processes, no side
//!   effects beyond reading files.
//!
//! - **[`engine`]: The Invokers.** Builds each engine's command sequence,
//!   runs it through a [`engine::invocation::ProcessRunner`], detects failure
//!   and locates the report artifact.
//!
//! - **[`workflows`]: The Public API.** Selects the backend for a request,
//!   composes its invoker and reader, and returns the normalized report along
//!   with the path of the raw artifact.

pub mod core;
pub mod engine;
pub mod workflows;
