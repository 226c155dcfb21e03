//! CLI argument definitions for the wavmeta command-line interface.

use clap::{Parser, Subcommand};
use wavmeta_cli::logging::LogFormat;

/// wavmeta - RIFF/WAVE chunk inspector
#[derive(Parser)]
#[command(name = "wavmeta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log format written to stderr (verbosity via RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the chunks of a WAVE file in canonical order
    Inspect {
        /// Path to the WAVE file
        file: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the root note and sampler loops of one or more WAVE files
    Loops {
        /// Paths to WAVE files
        #[arg(required = true)]
        files: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Re-serialize a WAVE file with its chunks in canonical order
    Rewrite {
        /// Path to the input WAVE file
        input: String,

        /// Path to write the rewritten file to
        output: String,
    },
}
