//! wavmeta CLI - inspect and rewrite RIFF/WAVE containers.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
use wavmeta_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging_with_format(cli.log_format);

    let result = match cli.command {
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
        Commands::Loops { files, json } => commands::loops::run(&files, json),
        Commands::Rewrite { input, output } => commands::rewrite::run(&input, &output),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_loops_accepts_many_files() {
        let cli = Cli::try_parse_from(["wavmeta", "loops", "a.wav", "b.wav", "--json"]).unwrap();
        match cli.command {
            Commands::Loops { files, json } => {
                assert_eq!(files, ["a.wav", "b.wav"]);
                assert!(json);
            }
            _ => panic!("expected loops command"),
        }
    }

    #[test]
    fn test_loops_requires_a_file() {
        assert!(Cli::try_parse_from(["wavmeta", "loops"]).is_err());
    }

    #[test]
    fn test_log_format_is_global() {
        let cli =
            Cli::try_parse_from(["wavmeta", "rewrite", "in.wav", "out.wav", "--log-format", "json"])
                .unwrap();
        assert_eq!(cli.log_format, logging::LogFormat::Json);
    }
}
