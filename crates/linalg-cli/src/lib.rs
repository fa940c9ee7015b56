//! Linalg CLI library
//!
//! Terminal front end for the calculator backend. Every subcommand drives
//! the same controller as the browser page.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{
    Cli, ColorArg, Commands, FieldInput, LinearCombinationArgs, MultiplyArgs, PairArgs, PlotMode,
    SolveArgs, TransposeArgs, UnitVectorArgs, VisualizeArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{summarize_scene, Reporter};
pub use runner::CommandRunner;
