//! Whole-file decode.
//!
//! Drives detection and both IFD passes, streaming everything into a
//! [`DumpSink`]. The sink sees the container and header first, then the
//! primary chain, then (if the primary chain carried an ExifIFDPointer) the
//! Exif chain. An ExifIFDPointer inside the Exif chain is not followed.

use tracing::{debug, warn};

use crate::dump::DumpSink;
use crate::error::FormatError;
use crate::io::RangeReader;

use super::detect::{parse_header, sniff_container};
use super::tiff::{FileContext, IfdKind, IfdWalker};

/// Options controlling what a decode visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Descend into the Exif sub-directory when the primary chain points to one
    pub follow_exif: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { follow_exif: true }
    }
}

/// Number of directories visited in each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub primary_ifds: usize,
    pub exif_ifds: usize,
}

/// Decode a TIFF or JPEG/Exif input into `sink`.
///
/// Output already handed to the sink stays there when a later step fails,
/// so a truncated file still dumps everything before the bad read.
pub fn decode<R, S>(
    reader: &mut R,
    sink: &mut S,
    options: DecodeOptions,
) -> Result<DecodeSummary, FormatError>
where
    R: RangeReader,
    S: DumpSink + ?Sized,
{
    let (container, prefix) = sniff_container(reader)?;
    sink.container(container)?;
    let header = parse_header(reader, container, &prefix)?;
    sink.header(&header)?;

    let mut ctx = FileContext::new(header.byte_order, header.tiff_base);
    let mut summary = DecodeSummary::default();

    summary.primary_ifds =
        IfdWalker::new(reader, &mut ctx).walk(IfdKind::Primary, header.first_ifd_offset, sink)?;

    match ctx.exif_ifd_offset.take() {
        Some(exif_offset) if options.follow_exif => {
            sink.begin_exif()?;
            summary.exif_ifds =
                IfdWalker::new(reader, &mut ctx).walk(IfdKind::Exif, exif_offset, sink)?;

            if let Some(nested) = ctx.exif_ifd_offset {
                warn!(offset = nested, "nested Exif IFD pointer not followed");
            }
        }
        Some(exif_offset) => {
            debug!(offset = exif_offset, "skipping Exif IFD");
        }
        None => {}
    }

    sink.finish()?;
    debug!(
        source = reader.identifier(),
        primary_ifds = summary.primary_ifds,
        exif_ifds = summary.exif_ifds,
        "decode complete"
    );
    Ok(summary)
}
