use colored::Colorize;
use std::path::Path;
use wavmeta::{ParseWarning, WavFile};

/// BLAKE3 hex digest of the `data` payload.
pub(crate) fn data_hash(wav: &WavFile) -> String {
    blake3::hash(wav.data()).to_hex().to_string()
}

/// File name shown in human-readable headers.
pub(crate) fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

pub(crate) fn print_warnings(warnings: &[ParseWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}
