//! pomsynth CLI library
//!
//! Argument parsing, output rendering and command handlers for the `pomsynth`
//! binary. Kept as a library so command handlers can be exercised from
//! integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
