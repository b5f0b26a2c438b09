//! Format parsers for TIFF and JPEG/Exif files.
//!
//! # Format Detection
//!
//! Use [`detect::detect_header`] to identify the container and parse the
//! TIFF header. Supported containers:
//!
//! - **TIFF**: II or MM byte order mark at the start of the file
//! - **JPEG/Exif**: SOI followed by an APP1 "Exif" segment; the TIFF
//!   stream starts at byte 12
//!
//! [`decode::decode`] runs detection and both IFD passes into a sink.

pub mod decode;
pub mod detect;
pub mod jpeg;
pub mod tiff;

pub use decode::{decode, DecodeOptions, DecodeSummary};
pub use detect::{detect_header, parse_header, sniff_container, Container, FileHeader};
