//! # tiff-metadata
//!
//! Dumps the Image File Directories of a TIFF file, or of the Exif block
//! embedded in a JPEG file.
//!
//! Every directory entry is decoded in the file's byte order and printed
//! with its tag name, field type, count and value, with human-readable
//! descriptions for enumerated values.
//!
//! ## Features
//!
//! - **Both byte orders**: Intel (II) and Motorola (MM) files decode the same
//! - **JPEG/Exif**: the TIFF stream inside an APP1 Exif segment is found automatically
//! - **Exif sub-directory**: followed from the ExifIFDPointer tag of the primary chain
//! - **Text or JSON output**: the reference text layout or line-delimited JSON
//! - **Bounded reads**: untrusted counts and offsets are checked against the file size
//!
//! ## Architecture
//!
//! - [`io`] - Positional range reads over a seekable source
//! - [`mod@format`] - Container detection, TIFF header and IFD decoding
//! - [`dump`] - Text and JSON sinks fed by the decoder
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiff_metadata::{dump_path, DecodeOptions, OutputFormat};
//!
//! let stdout = std::io::stdout();
//! let summary = dump_path(
//!     "photo.jpg".as_ref(),
//!     OutputFormat::Text,
//!     DecodeOptions::default(),
//!     stdout.lock(),
//! )?;
//! eprintln!("{} primary IFDs", summary.primary_ifds);
//! # Ok::<(), tiff_metadata::FormatError>(())
//! ```

use std::io::Write;
use std::path::Path;

mod ascii;
pub mod config;
pub mod dump;
pub mod error;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use dump::{hex_dump, DumpSink, JsonDumper, TextDumper};
pub use error::{FormatError, IoError, TiffError};
pub use format::tiff::{
    tag_name, value_description, ByteOrder, DecodedEntry, Endianness, FieldType, FileContext,
    IfdEntry, IfdKind, IfdWalker, IndirectData, Payload, TiffHeader, Value, ValueReader,
    TIFF_HEADER_SIZE,
};
pub use format::{decode, detect_header, Container, DecodeOptions, DecodeSummary, FileHeader};
pub use io::{RangeReader, SeekReader};

/// Open `path` and dump it to `out` in the requested format.
///
/// Whatever was rendered before a failure has already been written to
/// `out`; the caller decides whether to flush it.
pub fn dump_path<W: Write>(
    path: &Path,
    format: OutputFormat,
    options: DecodeOptions,
    out: W,
) -> Result<DecodeSummary, FormatError> {
    let mut reader = SeekReader::open(path)?;

    match format {
        OutputFormat::Text => decode(&mut reader, &mut TextDumper::new(out), options),
        OutputFormat::Json => decode(&mut reader, &mut JsonDumper::new(out), options),
    }
}
