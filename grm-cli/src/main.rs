mod breakpoints;
mod extract;

use std::fs::File;

use anyhow::{Context, Result};
use clap::{Command, arg};
use env_logger::{Target, WriteStyle};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "grm";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Read extraction and breakpoint maps for graph-based structural variant genotyping.")
        .subcommand_required(true)
        .arg(
            arg!(--"log-level" <LEVEL> "Log level: error, warn, info, debug or trace")
                .global(true)
                .default_value(consts::DEFAULT_LOG_LEVEL),
        )
        .arg(
            arg!(--"log-file" <LOG_FILE> "Write the log to this file instead of stderr")
                .global(true)
                .required(false),
        )
        .subcommand(extract::cli::create_extract_cli())
        .subcommand(breakpoints::cli::create_breakpoints_cli())
}

fn build_logger(level: &str, log_file: Option<&str>) -> Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level).format_timestamp_millis();

    if let Some(path) = log_file {
        let file =
            File::create(path).with_context(|| format!("Failed to create log file: {}", path))?;
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never);
    }
    Ok(builder)
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(consts::DEFAULT_LOG_LEVEL);
    let log_file = matches.get_one::<String>("log-file").map(String::as_str);
    build_logger(log_level, log_file)?.init();

    match matches.subcommand() {
        //
        // READ EXTRACTION
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        //
        // BREAKPOINT MAP
        //
        Some((breakpoints::cli::BREAKPOINTS_CMD, matches)) => {
            breakpoints::handlers::run_breakpoints(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_global_log_level_after_subcommand() {
        let matches = build_parser()
            .try_get_matches_from(["grm", "breakpoints", "-g", "graph.json", "--log-level", "debug"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("log-level").map(String::as_str),
            Some("debug")
        );
    }

    #[rstest]
    fn test_log_file_receives_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grm.log");

        let logger = build_logger("info", Some(path.to_str().unwrap()))
            .unwrap()
            .build();
        log::Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("Retrieving for region chr1:1-2"))
                .level(log::Level::Info)
                .target("grm")
                .build(),
        );
        log::Log::flush(&logger);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Retrieving for region chr1:1-2"));
        assert!(contents.contains("INFO"));
    }

    #[rstest]
    fn test_log_file_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grm.log");
        assert!(build_logger("info", Some(path.to_str().unwrap())).is_err());
    }
}
