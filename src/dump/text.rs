//! Human-readable dump.
//!
//! ```text
//! Intel (little-endian) byte order
//! Magic 42
//! IFD offset 8
//! number of IFD entries 1
//!
//! IFD entry 1
//! 	Tag 256 (0100.H) ImageWidth
//! 	Type 3 SHORT
//! 	Count 1
//! 	Value 100 pixels
//!
//! End of IFD list
//! ```

use std::io::Write;

use crate::error::IoError;
use crate::format::tiff::{tag_name, DecodedEntry, IfdKind, IndirectData, Payload};
use crate::format::{Container, FileHeader};

use super::{hex_dump, write_error, DumpSink};

/// Writes the line-oriented dump to any [`Write`].
pub struct TextDumper<W: Write> {
    out: W,
}

impl<W: Write> TextDumper<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn payload(&mut self, payload: &Payload) -> Result<(), IoError> {
        let written = match payload {
            Payload::Inline(value) => writeln!(self.out, "\tValue {}", value),
            Payload::InlineBytes(bytes) => self.out.write_all(hex_dump(bytes).as_bytes()),
            Payload::Indirect { offset, data } => {
                writeln!(self.out, "\tOffset {}", offset).map_err(write_error)?;
                match data {
                    IndirectData::Text(_) => writeln!(
                        self.out,
                        "\t  String \"{}\"",
                        data.text().unwrap_or_default()
                    ),
                    IndirectData::Bytes(bytes) => self.out.write_all(hex_dump(bytes).as_bytes()),
                    IndirectData::Values(values) => values
                        .iter()
                        .enumerate()
                        .try_for_each(|(i, value)| writeln!(self.out, "\t  {} Value {}", i, value)),
                }
            }
        };
        written.map_err(write_error)
    }
}

impl<W: Write> DumpSink for TextDumper<W> {
    fn container(&mut self, container: Container) -> Result<(), IoError> {
        if container == Container::Jpeg {
            writeln!(self.out, "JPEG file").map_err(write_error)?;
        }
        Ok(())
    }

    fn header(&mut self, header: &FileHeader) -> Result<(), IoError> {
        writeln!(self.out, "{} byte order", header.byte_order.description()).map_err(write_error)?;
        writeln!(self.out, "Magic {}", header.magic).map_err(write_error)?;
        writeln!(self.out, "IFD offset {}", header.first_ifd_offset).map_err(write_error)
    }

    fn begin_exif(&mut self) -> Result<(), IoError> {
        writeln!(self.out, "\nExif header").map_err(write_error)
    }

    fn begin_ifd(&mut self, _kind: IfdKind, _offset: u32, entry_count: u16) -> Result<(), IoError> {
        writeln!(self.out, "number of IFD entries {}", entry_count).map_err(write_error)
    }

    fn entry(&mut self, index: u16, entry: &DecodedEntry) -> Result<(), IoError> {
        write!(
            self.out,
            "\nIFD entry {}\n\tTag {} ({:04X}.H) {}\n\tType {} {}\n\tCount {}\n",
            u32::from(index) + 1,
            entry.tag,
            entry.tag,
            tag_name(entry.tag),
            entry.field_type.as_u16(),
            entry.field_type.name(),
            entry.count,
        )
        .map_err(write_error)?;
        self.payload(&entry.payload)
    }

    fn end_ifd(&mut self, next_offset: u32) -> Result<(), IoError> {
        let written = if next_offset == 0 {
            writeln!(self.out, "\nEnd of IFD list")
        } else {
            writeln!(self.out, "\nnext IFD offset {}", next_offset)
        };
        written.map_err(write_error)
    }

    fn finish(&mut self) -> Result<(), IoError> {
        self.out.flush().map_err(write_error)
    }
}
