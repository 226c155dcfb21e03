//! wavmeta CLI library.
//!
//! Command implementations and output types for the `wavmeta` binary. Every
//! command reads containers only through the public `wavmeta` API.

pub mod commands;
pub mod logging;
