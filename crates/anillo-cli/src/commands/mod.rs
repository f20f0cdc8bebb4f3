//! CLI subcommands.

pub mod devices;
pub mod play;
