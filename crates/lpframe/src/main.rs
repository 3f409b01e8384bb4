mod exit;
mod logging;

use std::io;

use clap::Parser;
use lpframe::frame::Framer;

use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::logging::{init_logging, LogFormat, LogLevel};

/// Read stdin to end-of-stream and write it to stdout behind a 4-byte
/// little-endian length header.
#[derive(Parser, Debug)]
#[command(name = "lpframe", version)]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

fn run() -> CliResult<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let summary = Framer::new()
        .frame(stdin.lock(), stdout.lock())
        .map_err(frame_error)?;

    tracing::info!(
        payload_len = summary.payload_len,
        wire_size = summary.wire_size(),
        "stdin framed to stdout"
    );
    Ok(SUCCESS)
}
