//! Inspect command implementation
//!
//! Lists the chunks of a WAVE file in canonical order with a hex preview of
//! each payload, followed by the decoded format and any parse warnings.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use wavmeta::WavFile;

use super::json_output::{ChunkSummary, InspectOutput, InspectResult, JsonError, JsonWarning};
use super::reporting::{data_hash, display_name, print_warnings};

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 on success, 1 if the file could not be parsed
pub fn run(path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(path)
    } else {
        run_human(path)
    }
}

/// Collects the report for a parsed container.
///
/// A `fmt ` chunk that fails to decode is reported through `compression`
/// rather than failing the whole report.
pub fn inspect(wav: &WavFile) -> InspectResult {
    let (format, compression) = match wav.format() {
        Ok(format) => (Some(format.clone()), format.compression_name().to_string()),
        Err(err) => (None, err.to_string()),
    };
    InspectResult {
        format,
        compression,
        frame_count: wav.frame_count().ok(),
        data_hash: data_hash(wav),
        chunks: wav.canonical_chunks().map(ChunkSummary::from).collect(),
        warnings: wav.warnings().iter().map(JsonWarning::from).collect(),
    }
}

fn run_human(path: &str) -> Result<ExitCode> {
    let wav = WavFile::open(path).with_context(|| format!("Failed to parse WAVE file: {}", path))?;
    let report = inspect(&wav);

    println!("{} {}", "File:".cyan().bold(), display_name(path));

    println!("\n{}", "Chunks:".cyan().bold());
    for chunk in &report.chunks {
        let label = match &chunk.list_type {
            Some(list_type) => format!("'{}' ({})", chunk.tag, list_type),
            None => format!("'{}'", chunk.tag),
        };
        println!("  {} {} bytes", label.bold(), chunk.size);
        if !chunk.preview.is_empty() {
            println!("    {}", chunk.preview.dimmed());
        }
    }

    println!("\n{}", "Format:".cyan().bold());
    println!("  {} {}", "Compression:".dimmed(), report.compression);
    if let Some(format) = &report.format {
        println!("  {} {}", "Channels:".dimmed(), format.channels);
        println!("  {} {} Hz", "Sample rate:".dimmed(), format.sample_rate);
        if let Some(bits) = format.bits_per_sample {
            println!("  {} {}", "Bits per sample:".dimmed(), bits);
        }
    }
    if let Some(frames) = report.frame_count {
        println!("  {} {}", "Frames:".dimmed(), frames);
    }
    println!("  {} {}", "Data hash:".dimmed(), &report.data_hash[..16]);

    print_warnings(wav.warnings());

    Ok(ExitCode::SUCCESS)
}

fn run_json(path: &str) -> Result<ExitCode> {
    let (output, code) = match WavFile::open(path) {
        Ok(wav) => (
            InspectOutput {
                success: true,
                file: path.to_string(),
                result: Some(inspect(&wav)),
                errors: Vec::new(),
            },
            ExitCode::SUCCESS,
        ),
        Err(err) => (
            InspectOutput {
                success: false,
                file: path.to_string(),
                result: None,
                errors: vec![JsonError::from(&err).with_file(path)],
            },
            ExitCode::from(1),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
