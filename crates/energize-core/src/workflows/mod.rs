//! # Workflows Module
//!
//! High-level entry points. [`evaluate`] turns one evaluation request into an
//! [`evaluate::Evaluation`]: it picks the single backend the request names,
//! runs that engine and parses its report.

pub mod evaluate;
