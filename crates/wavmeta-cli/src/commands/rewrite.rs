//! Rewrite command implementation
//!
//! Parses a WAVE file and writes it back with chunks in canonical order.
//! Payload bytes are copied verbatim.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use wavmeta::WavFile;

use super::reporting::print_warnings;

/// Run the rewrite command
pub fn run(input: &str, output: &str) -> Result<ExitCode> {
    let wav = rewrite(input, output)?;

    println!(
        "{} {} -> {} ({} chunks, {} bytes)",
        "Rewrote".green().bold(),
        input,
        output,
        wav.chunks().len(),
        u64::from(wav.riff_size()?) + 8
    );
    print_warnings(wav.warnings());

    Ok(ExitCode::SUCCESS)
}

/// Parses `input` and writes it to `output`, returning the parsed container.
pub fn rewrite(input: &str, output: &str) -> Result<WavFile> {
    let wav =
        WavFile::open(input).with_context(|| format!("Failed to parse WAVE file: {}", input))?;
    wav.write_file(output)
        .with_context(|| format!("Failed to write file: {}", output))?;
    tracing::info!(input, output, chunks = wav.chunks().len(), "rewrote file");
    Ok(wav)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wavmeta::{ChunkTag, FormatChunk, WavBuilder};

    #[test]
    fn test_rewrite_moves_format_first() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        let original = WavBuilder::new()
            .chunk(ChunkTag::from_bytes(*b"JUNK"), vec![0; 3])
            .data(vec![1, 2, 3, 4])
            .format(&FormatChunk::pcm(1, 22050, 16))
            .build()
            .unwrap();
        let mut source = Vec::new();
        for chunk in original.chunks() {
            chunk.write_to(&mut source).unwrap();
        }
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&(source.len() as u32 + 4).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend(source);
        std::fs::write(&input, &bytes).unwrap();

        rewrite(input.to_str().unwrap(), output.to_str().unwrap()).unwrap();

        let rewritten = WavFile::open(&output).unwrap();
        let tags: Vec<_> = rewritten.chunks().iter().map(|c| c.tag().to_string()).collect();
        assert_eq!(tags, ["fmt ", "JUNK", "data"]);
        assert_eq!(rewritten.data(), &[1, 2, 3, 4]);
        assert!(rewritten.warnings().is_empty());
    }

    #[test]
    fn test_rewrite_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = rewrite(
            dir.path().join("missing.wav").to_str().unwrap(),
            dir.path().join("out.wav").to_str().unwrap(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse WAVE file"));
    }
}
