//! Command-line configuration for tiff-metadata.
//!
//! This module provides the configuration for the dump tool:
//! - Command-line arguments via clap
//! - Environment variables with the `TIFF_METADATA_` prefix
//! - Defaults for every optional setting
//!
//! # Example
//!
//! ```ignore
//! use tiff_metadata::config::Config;
//!
//! let config = Config::parse();
//! println!("Dumping {}", config.file.display());
//! ```
//!
//! # Environment Variables
//!
//! - `TIFF_METADATA_FORMAT` - Output format, `text` or `json` (default: text)
//! - `TIFF_METADATA_NO_EXIF` - Skip the Exif sub-directory (default: false)
//! - `RUST_LOG` - Overrides the log filter chosen by `--verbose`

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::format::DecodeOptions;

// =============================================================================
// Default Values
// =============================================================================

/// Log filter used without `--verbose`.
pub const DEFAULT_LOG_FILTER: &str = "tiff_metadata=warn";

/// Log filter used with `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "tiff_metadata=debug";

/// Output format of the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented human-readable listing
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// tiff-metadata - Dump the IFD metadata of TIFF and JPEG/Exif files.
///
/// Prints the header, every directory entry of the primary IFD chain and,
/// when present, the Exif sub-directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiff-metadata")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// TIFF or JPEG file to dump.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "TIFF_METADATA_FORMAT")]
    pub format: OutputFormat,

    /// Do not descend into the Exif sub-directory.
    #[arg(long, default_value_t = false, env = "TIFF_METADATA_NO_EXIF")]
    pub no_exif: bool,

    /// Enable verbose logging (debug level) on stderr.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.file.as_os_str().is_empty() {
            return Err("FILE must not be empty".to_string());
        }

        if self.file.is_dir() {
            return Err(format!("{} is a directory", self.file.display()));
        }

        Ok(())
    }

    /// Decode options selected by the flags.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            follow_exif: !self.no_exif,
        }
    }

    /// Default log filter, before any `RUST_LOG` override.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
