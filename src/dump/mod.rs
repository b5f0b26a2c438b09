//! Dump rendering.
//!
//! The decoder streams the file header, every directory and every entry to
//! a [`DumpSink`] as soon as they are decoded. Two sinks are provided:
//!
//! - [`TextDumper`]: the line-oriented human-readable layout
//! - [`JsonDumper`]: one JSON object per line, for scripts

mod hexdump;
mod json;
mod text;

pub use hexdump::hex_dump;
pub use json::JsonDumper;
pub use text::TextDumper;

use crate::error::IoError;
use crate::format::tiff::{DecodedEntry, IfdKind};
use crate::format::{Container, FileHeader};

/// Receiver of decode events.
///
/// Events arrive in file order: `container`, `header`, then for each directory
/// `begin_ifd`, one `entry` per record and `end_ifd`. `begin_exif` precedes
/// the Exif chain. `finish` is only called after a successful decode.
pub trait DumpSink {
    /// Container sniffed from the first bytes, before the TIFF header is
    /// located. A JPEG without an Exif segment stops right after this.
    fn container(&mut self, _container: Container) -> Result<(), IoError> {
        Ok(())
    }

    fn header(&mut self, header: &FileHeader) -> Result<(), IoError>;

    fn begin_exif(&mut self) -> Result<(), IoError>;

    /// Start of a directory at `offset` (relative to the TIFF header).
    fn begin_ifd(&mut self, kind: IfdKind, offset: u32, entry_count: u16) -> Result<(), IoError>;

    /// One decoded entry; `index` is zero-based within its directory.
    fn entry(&mut self, index: u16, entry: &DecodedEntry) -> Result<(), IoError>;

    /// End of a directory; `next_offset` of 0 ends the chain.
    fn end_ifd(&mut self, next_offset: u32) -> Result<(), IoError>;

    fn finish(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}

impl<S: DumpSink + ?Sized> DumpSink for &mut S {
    fn container(&mut self, container: Container) -> Result<(), IoError> {
        (**self).container(container)
    }

    fn header(&mut self, header: &FileHeader) -> Result<(), IoError> {
        (**self).header(header)
    }

    fn begin_exif(&mut self) -> Result<(), IoError> {
        (**self).begin_exif()
    }

    fn begin_ifd(&mut self, kind: IfdKind, offset: u32, entry_count: u16) -> Result<(), IoError> {
        (**self).begin_ifd(kind, offset, entry_count)
    }

    fn entry(&mut self, index: u16, entry: &DecodedEntry) -> Result<(), IoError> {
        (**self).entry(index, entry)
    }

    fn end_ifd(&mut self, next_offset: u32) -> Result<(), IoError> {
        (**self).end_ifd(next_offset)
    }

    fn finish(&mut self) -> Result<(), IoError> {
        (**self).finish()
    }
}

/// Map a failed write on the output stream.
pub(crate) fn write_error(err: std::io::Error) -> IoError {
    IoError::Write(err.to_string())
}
