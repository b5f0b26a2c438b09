//! IFD chain traversal.
//!
//! An IFD is a 2-byte entry count, that many 12-byte entries, and a 4-byte
//! offset to the next IFD. A next offset of 0 ends the chain. All offsets
//! are relative to the TIFF header.

use std::collections::HashSet;

use tracing::debug;

use crate::dump::DumpSink;
use crate::error::TiffError;
use crate::io::RangeReader;

use super::parser::{IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE};
use super::values::{FileContext, ValueReader};

/// Which chain a directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfdKind {
    /// The chain starting at the header's first IFD offset
    Primary,
    /// The chain starting at the ExifIFDPointer value
    Exif,
}

impl IfdKind {
    pub const fn name(self) -> &'static str {
        match self {
            IfdKind::Primary => "primary",
            IfdKind::Exif => "exif",
        }
    }
}

/// Walks one IFD chain, handing every decoded entry to a sink as soon as
/// it is decoded.
pub struct IfdWalker<'a, R: RangeReader> {
    reader: &'a mut R,
    ctx: &'a mut FileContext,
}

impl<'a, R: RangeReader> IfdWalker<'a, R> {
    pub fn new(reader: &'a mut R, ctx: &'a mut FileContext) -> Self {
        Self { reader, ctx }
    }

    /// Walk the chain starting at `first_offset` until a zero next offset.
    ///
    /// Returns the number of directories visited.
    ///
    /// # Errors
    /// - `TiffError::Io` on any short read of a count, entry or next offset
    /// - `TiffError::IfdLoop` if the chain revisits a directory
    pub fn walk<S: DumpSink + ?Sized>(
        &mut self,
        kind: IfdKind,
        first_offset: u32,
        sink: &mut S,
    ) -> Result<usize, TiffError> {
        let mut visited = HashSet::new();
        let mut current = first_offset;

        while current != 0 {
            if !visited.insert(current) {
                return Err(TiffError::IfdLoop(current));
            }
            current = self.walk_ifd(kind, current, sink)?;
        }

        Ok(visited.len())
    }

    /// Decode a single directory and return its next offset.
    fn walk_ifd<S: DumpSink + ?Sized>(
        &mut self,
        kind: IfdKind,
        offset: u32,
        sink: &mut S,
    ) -> Result<u32, TiffError> {
        let endian = self.ctx.endian;
        let start = self.ctx.absolute(offset);

        let count_bytes = self.reader.read_exact_at(start, IFD_COUNT_SIZE)?;
        let entry_count = endian.read_u16(&count_bytes);
        debug!(kind = kind.name(), offset, entry_count, "reading IFD");
        sink.begin_ifd(kind, offset, entry_count)?;

        let mut position = start + IFD_COUNT_SIZE as u64;
        for index in 0..entry_count {
            let bytes = self.reader.read_exact_at(position, IFD_ENTRY_SIZE)?;
            let mut record = [0u8; IFD_ENTRY_SIZE];
            record.copy_from_slice(&bytes);

            let entry = ValueReader::new(&mut *self.reader, &mut *self.ctx).decode_entry(&record)?;
            sink.entry(index, &entry)?;
            position += IFD_ENTRY_SIZE as u64;
        }

        let next_bytes = self.reader.read_exact_at(position, IFD_NEXT_OFFSET_SIZE)?;
        let next = endian.read_u32(&next_bytes);
        sink.end_ifd(next)?;

        Ok(next)
    }
}
