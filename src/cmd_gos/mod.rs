//! Subcommand modules for the `gos` binary.

pub mod clades;
pub mod scaffold;
pub mod targets;
pub mod utils;
