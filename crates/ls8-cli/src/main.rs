//! CLI entry point for the LS-8 interpreter binary.

mod config;

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use ls8_core::{load_file, run, MachineState, TraceEvent, TraceSink};
#[cfg(test)]
use tempfile as _;

use crate::config::{CliConfig, DEFAULT_LOG_FILTER, TRACE_ENV_VAR};

const USAGE_TEXT: &str = "\
Usage: ls8 <program.ls8>

Loads a program of newline-delimited binary bytes and runs it.

Options:
  -h, --help  Show this help message

Environment:
  LS8_TRACE=1  Print a trace line per instruction to stderr
  RUST_LOG     Log filter (default: warn)

Examples:
  ls8 programs/print8.ls8
  LS8_TRACE=1 ls8 programs/call.ls8
";

#[derive(Debug, PartialEq, Eq)]
enum ParseResult {
    Program(PathBuf),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let args: Vec<OsString> = args.collect();

    match args.as_slice() {
        [] => Err("missing program path".to_string()),
        [only] if only == "--help" || only == "-h" => Ok(ParseResult::Help),
        [only] => Ok(ParseResult::Program(PathBuf::from(only))),
        many => Err(format!(
            "expected exactly one program path, got {} arguments",
            many.len()
        )),
    }
}

/// Writes each trace event as one line on stderr.
struct StderrTrace;

impl TraceSink for StderrTrace {
    fn on_event(&mut self, event: TraceEvent) {
        eprintln!("{event}");
    }
}

fn run_program(path: &Path, config: &CliConfig) -> Result<(), i32> {
    let image = match load_file(path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    let mut state = match MachineState::with_program(&image) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    if config.run.tracing_enabled {
        debug!("tracing enabled via {TRACE_ENV_VAR}");
    }

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let result = run(&mut state, &config.run, &mut output, &mut StderrTrace);
    let flushed = output.flush();

    match (result, flushed) {
        (Ok(summary), Ok(())) => {
            debug!(
                "{} halted ({:?}) after {} instructions",
                path.display(),
                summary.halt_reason,
                summary.instructions_retired
            );
            Ok(())
        }
        (Err(e), _) => {
            eprintln!("error: {e}");
            Err(1)
        }
        (Ok(_), Err(e)) => {
            eprintln!("error: failed to write program output: {e}");
            Err(1)
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
}

fn main() {
    init_logging();

    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Program(path)) => match run_program(&path, &CliConfig::from_env()) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
