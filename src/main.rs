//! tiff-metadata - Dump the IFD metadata of TIFF and JPEG/Exif files.
//!
//! The dump goes to stdout; diagnostics and errors go to stderr.

use std::io::{BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiff_metadata::{config::Config, dump_path};

fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported through the same path
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(config.log_filter());

    if let Err(e) = config.validate() {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    run_dump(&config)
}

// =============================================================================
// Dump Command
// =============================================================================

fn run_dump(config: &Config) -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = dump_path(&config.file, config.format, config.decode_options(), &mut out);
    let flushed = out.flush();

    match (result, flushed) {
        (Ok(summary), Ok(())) => {
            debug!(
                file = %config.file.display(),
                primary_ifds = summary.primary_ifds,
                exif_ifds = summary.exif_ifds,
                "dump finished"
            );
            ExitCode::SUCCESS
        }
        (Err(e), _) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
        (Ok(_), Err(e)) => {
            eprintln!("error: write error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem on stderr.
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
