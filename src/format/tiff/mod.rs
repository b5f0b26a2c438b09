//! TIFF structure decoding.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF files declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. Every multi-byte field is read in host
//!   order and swapped when the host and file disagree.
//!
//! - **IFD (Image File Directory)**: a counted list of 12-byte entries plus an
//!   offset to the next IFD. A file holds a chain of them, and the Exif block
//!   hangs off the ExifIFDPointer tag as a second chain.
//!
//! - **Inline vs offset values**: payloads of at most 4 bytes are stored in
//!   the entry itself, larger ones at an offset relative to the TIFF header.

mod parser;
mod tags;
mod values;
mod walker;

pub use parser::{
    ByteOrder, Endianness, IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE,
    IFD_NEXT_OFFSET_SIZE, TIFF_HEADER_SIZE, TIFF_MAGIC,
};
pub use tags::{tag_name, value_description, FieldType, TAG_EXIF_IFD_POINTER};
pub use values::{decode_value, DecodedEntry, FileContext, IndirectData, Payload, Value, ValueReader};
pub use walker::{IfdKind, IfdWalker};
