//! Container detection.
//!
//! Decides whether the input is a bare TIFF file or a JPEG file with an
//! embedded Exif/TIFF block, and parses the TIFF header at the right base.
//!
//! # Detection Logic
//!
//! 1. Read the first 128 bytes (or the whole file if shorter)
//! 2. `FF D8` means JPEG: require APP1 + "Exif" and use base 12
//! 3. Otherwise the TIFF header starts at byte 0
//! 4. Check the II/MM mark, then read the 8-byte header and its magic

use bytes::Bytes;
use tracing::debug;

use crate::error::{FormatError, TiffError};
use crate::io::RangeReader;

use super::jpeg;
use super::tiff::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};

/// Number of leading bytes examined for container detection.
const SNIFF_BYTES: usize = 128;

// =============================================================================
// Container
// =============================================================================

/// Detected container around the TIFF stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Bare TIFF file
    Tiff,
    /// JPEG file with an APP1 Exif segment
    Jpeg,
}

impl Container {
    pub const fn name(&self) -> &'static str {
        match self {
            Container::Tiff => "tiff",
            Container::Jpeg => "jpeg",
        }
    }
}

/// Everything the IFD walk needs to know about the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub container: Container,
    /// Position of the TIFF header within the input
    pub tiff_base: u64,
    pub byte_order: ByteOrder,
    pub magic: u16,
    /// First IFD offset, relative to `tiff_base`
    pub first_ifd_offset: u32,
}

// =============================================================================
// Detection
// =============================================================================

/// Read the leading bytes and decide the container.
///
/// Returns the sniffed prefix (at most 128 bytes) so the header can be
/// located without a second read.
pub fn sniff_container<R: RangeReader + ?Sized>(
    reader: &mut R,
) -> Result<(Container, Bytes), FormatError> {
    let prefix = reader.read_prefix(0, SNIFF_BYTES)?;
    let container = if jpeg::is_jpeg(&prefix) {
        Container::Jpeg
    } else {
        Container::Tiff
    };
    Ok((container, prefix))
}

/// Detect the container and parse the TIFF header.
///
/// # Errors
/// * `FormatError::MissingExifHeader` - JPEG without a leading APP1 Exif segment
/// * `FormatError::Tiff` - unsupported byte order mark, bad magic, too small
/// * `FormatError::Io` - the header could not be read
pub fn detect_header<R: RangeReader + ?Sized>(reader: &mut R) -> Result<FileHeader, FormatError> {
    let (container, prefix) = sniff_container(reader)?;
    parse_header(reader, container, &prefix)
}

/// Locate the TIFF header for `container` and parse it.
///
/// `prefix` is the output of [`sniff_container`].
pub fn parse_header<R: RangeReader + ?Sized>(
    reader: &mut R,
    container: Container,
    prefix: &[u8],
) -> Result<FileHeader, FormatError> {
    let tiff_base = match container {
        Container::Jpeg => {
            debug!(app1_length = ?jpeg::app1_length(prefix), "JPEG container");
            jpeg::exif_tiff_offset(prefix).ok_or(FormatError::MissingExifHeader)?
        }
        Container::Tiff => 0,
    };

    let base = tiff_base as usize;
    let mark = prefix
        .get(base..base + 2)
        .ok_or(TiffError::FileTooSmall {
            required: tiff_base + 2,
            actual: prefix.len() as u64,
        })?;
    if ByteOrder::from_mark([mark[0], mark[1]]).is_none() {
        return Err(TiffError::UnsupportedByteOrder(u16::from_be_bytes([mark[0], mark[1]])).into());
    }

    let header_bytes = reader.read_exact_at(tiff_base, TIFF_HEADER_SIZE)?;
    let header = TiffHeader::parse(&header_bytes)?;

    debug!(
        source = reader.identifier(),
        container = container.name(),
        tiff_base,
        first_ifd_offset = header.first_ifd_offset,
        "parsed TIFF header"
    );

    Ok(FileHeader {
        container,
        tiff_base,
        byte_order: header.byte_order,
        magic: header.magic,
        first_ifd_offset: header.first_ifd_offset,
    })
}

// =============================================================================
// Tests
// =============================================================================
