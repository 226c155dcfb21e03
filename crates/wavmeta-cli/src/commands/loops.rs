//! Loops command implementation
//!
//! Prints the root note and sampler loops of each file. A file that fails to
//! parse is reported and skipped; the command exits non-zero at the end.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use wavmeta::{LoopPoint, WavError, WavFile};

use super::json_output::{JsonError, LoopsOutput};
use super::reporting::display_name;

/// Run the loops command over every path in order
///
/// # Returns
/// Exit code: 0 if every file was read, 1 otherwise
pub fn run(paths: &[String], json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(paths)
    } else {
        run_human(paths)
    }
}

/// One loop as a report line.
pub fn format_loop(lp: &LoopPoint) -> String {
    format!(
        "Loop #{} - start: {:10} end: {:10}",
        lp.cue_point_id, lp.start, lp.end
    )
}

/// Reads the root note and loops of one file.
///
/// Decoding failures of the `smpl` chunk are reported the same way as parse
/// failures.
pub fn read_loops(path: &str) -> Result<(Option<i32>, Vec<LoopPoint>), WavError> {
    let wav = WavFile::open(path)?;
    let smpl = wav.sample_metadata()?;
    Ok((
        smpl.map(|smpl| smpl.midi_unity_note),
        smpl.map(|smpl| smpl.loops.clone()).unwrap_or_default(),
    ))
}

fn run_human(paths: &[String]) -> Result<ExitCode> {
    let mut failed = 0usize;
    for path in paths {
        println!("{} {}", "File:".cyan().bold(), display_name(path));
        match read_loops(path) {
            Ok((root_note, loops)) => {
                if let Some(note) = root_note {
                    println!("Root note: {}", note);
                }
                for lp in &loops {
                    println!("{}", format_loop(lp));
                }
            }
            Err(err) => {
                failed += 1;
                tracing::debug!(path = %path, code = err.code(), "skipping file");
                eprintln!(
                    "{} Could not parse WAV file '{}': {}",
                    "x".red(),
                    path,
                    err
                );
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "\n{} {} of {} files could not be read",
            "FAILED".red().bold(),
            failed,
            paths.len()
        );
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_json(paths: &[String]) -> Result<ExitCode> {
    let outputs: Vec<LoopsOutput> = paths
        .iter()
        .map(|path| match read_loops(path) {
            Ok((root_note, loops)) => LoopsOutput {
                success: true,
                file: path.clone(),
                root_note,
                loops,
                errors: Vec::new(),
            },
            Err(err) => LoopsOutput::failure(path.clone(), JsonError::from(&err).with_file(path)),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&outputs)?);

    if outputs.iter().all(|output| output.success) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wavmeta::{ChunkTag, FormatChunk, SampleChunk, WavBuilder};

    #[test]
    fn test_format_loop() {
        let line = format_loop(&LoopPoint::forward(3, 1200, 88200));
        assert_eq!(line, "Loop #3 - start:       1200 end:      88200");
    }

    #[test]
    fn test_read_loops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pad.wav");
        WavBuilder::new()
            .format(&FormatChunk::pcm(1, 44100, 16))
            .data(vec![0; 16])
            .sample(&SampleChunk {
                midi_unity_note: 57,
                loops: vec![LoopPoint::forward(0, 2, 7)],
                ..Default::default()
            })
            .build()
            .unwrap()
            .write_file(&path)
            .unwrap();

        let (root, loops) = read_loops(path.to_str().unwrap()).unwrap();
        assert_eq!(root, Some(57));
        assert_eq!(loops, [LoopPoint::forward(0, 2, 7)]);
    }

    #[test]
    fn test_read_loops_reports_bad_smpl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        WavBuilder::new()
            .format(&FormatChunk::pcm(1, 44100, 16))
            .data(vec![0; 16])
            .chunk(ChunkTag::SMPL, vec![0; 10])
            .build()
            .unwrap()
            .write_file(&path)
            .unwrap();

        let err = read_loops(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), "WAV_101");
    }
}
