//! CLI module
//!
//! Parses the command line and wires a load run from it.

mod commands;
mod runner;

pub use commands::{Cli, WarehouseKind};
pub use runner::Runner;
