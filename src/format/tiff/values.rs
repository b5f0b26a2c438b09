//! Directory entry decoding.
//!
//! Values can be stored either inline in the IFD entry (when the payload is
//! at most 4 bytes) or at an offset relative to the TIFF header. Indirect
//! payloads are fetched in a single range read and then split into
//! elements; ASCII and UNDEFINED payloads are kept whole.

use std::fmt;

use bytes::Bytes;
use tracing::debug;

use crate::ascii::is_printable;
use crate::error::{IoError, TiffError};
use crate::io::RangeReader;

use super::parser::{ByteOrder, Endianness, IfdEntry, IFD_ENTRY_SIZE};
use super::tags::{value_description, FieldType, TAG_EXIF_IFD_POINTER};

// =============================================================================
// FileContext
// =============================================================================

/// Decode state shared by every directory of one file.
///
/// `exif_ifd_offset` is the only value carried from one directory to the
/// next: it is set when an inline LONG ExifIFDPointer entry is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileContext {
    pub endian: Endianness,
    /// Position of the TIFF header within the input
    pub tiff_base: u64,
    pub exif_ifd_offset: Option<u32>,
}

impl FileContext {
    pub fn new(file_order: ByteOrder, tiff_base: u64) -> Self {
        Self {
            endian: Endianness::for_file(file_order),
            tiff_base,
            exif_ifd_offset: None,
        }
    }

    /// Absolute input position of an offset relative to the TIFF header.
    #[inline]
    pub fn absolute(&self, offset: u32) -> u64 {
        self.tiff_base + u64::from(offset)
    }
}

// =============================================================================
// Decoded values
// =============================================================================

/// One decoded element of an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// First byte of an ASCII run
    Ascii(u8),
    Short {
        value: u16,
        description: &'static str,
    },
    Long {
        value: u32,
        description: &'static str,
    },
    Rational {
        numerator: u32,
        denominator: u32,
    },
    SRational {
        numerator: i32,
        denominator: i32,
    },
    SShort(i16),
    SLong(i32),
    Float(f32),
    Double(f64),
    /// First raw byte, for BYTE, SBYTE and unknown types
    Raw(u8),
}

impl Value {
    /// Quotient of a rational value. A zero denominator gives inf or NaN.
    pub fn quotient(&self) -> Option<f64> {
        match *self {
            Value::Rational {
                numerator,
                denominator,
            } => Some(f64::from(numerator) / f64::from(denominator)),
            Value::SRational {
                numerator,
                denominator,
            } => Some(f64::from(numerator) / f64::from(denominator)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Ascii(byte) if is_printable(byte) => write!(f, "'{}'", byte as char),
            Value::Ascii(byte) => write!(f, "{}", byte),
            Value::Short { value, description } => write_described(f, value, description),
            Value::Long { value, description } => write_described(f, value, description),
            Value::Rational {
                numerator,
                denominator,
            } => write!(
                f,
                "({}/{}) {:.6}",
                numerator,
                denominator,
                self.quotient().unwrap_or_default()
            ),
            Value::SRational {
                numerator,
                denominator,
            } => write!(
                f,
                "({}/{}) {:.6}",
                numerator,
                denominator,
                self.quotient().unwrap_or_default()
            ),
            Value::SShort(value) => write!(f, "{}", value),
            Value::SLong(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Double(value) => write!(f, "{}", value),
            Value::Raw(byte) => write!(f, "0x{:x}", byte),
        }
    }
}

fn write_described(
    f: &mut fmt::Formatter<'_>,
    value: impl fmt::Display,
    description: &str,
) -> fmt::Result {
    if description.is_empty() {
        write!(f, "{}", value)
    } else {
        write!(f, "{} {}", value, description)
    }
}

/// Payload of an indirect entry.
#[derive(Debug, Clone, PartialEq)]
pub enum IndirectData {
    /// ASCII run, rendered as a string
    Text(Bytes),
    /// UNDEFINED run, rendered as a hex dump
    Bytes(Bytes),
    /// One value per element
    Values(Vec<Value>),
}

impl IndirectData {
    /// The string of an ASCII run, up to the first NUL.
    pub fn text(&self) -> Option<String> {
        match self {
            IndirectData::Text(bytes) => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
            }
            _ => None,
        }
    }
}

/// Where an entry's value came from and what it decoded to.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Value decoded from the 4-byte slot
    Inline(Value),
    /// UNDEFINED bytes stored in the slot
    InlineBytes(Bytes),
    /// Value fetched from `offset` (relative to the TIFF header)
    Indirect { offset: u32, data: IndirectData },
}

/// A fully decoded directory entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntry {
    pub tag: u16,
    pub field_type: FieldType,
    pub count: u32,
    pub payload: Payload,
}

// =============================================================================
// ValueReader
// =============================================================================

/// Decodes directory entries, fetching indirect payloads from the reader.
pub struct ValueReader<'a, R: RangeReader> {
    reader: &'a mut R,
    ctx: &'a mut FileContext,
}

impl<'a, R: RangeReader> ValueReader<'a, R> {
    pub fn new(reader: &'a mut R, ctx: &'a mut FileContext) -> Self {
        Self { reader, ctx }
    }

    /// Decode one 12-byte directory record.
    ///
    /// Inline LONG ExifIFDPointer entries record the Exif IFD offset in the
    /// file context as a side effect.
    pub fn decode_entry(
        &mut self,
        record: &[u8; IFD_ENTRY_SIZE],
    ) -> Result<DecodedEntry, TiffError> {
        let entry = IfdEntry::parse(record, self.ctx.endian);

        let payload = if entry.is_inline() {
            self.decode_inline(&entry)
        } else {
            self.decode_indirect(&entry)?
        };

        Ok(DecodedEntry {
            tag: entry.tag,
            field_type: entry.field_type,
            count: entry.count,
            payload,
        })
    }

    fn decode_inline(&mut self, entry: &IfdEntry) -> Payload {
        let endian = self.ctx.endian;
        let slot = &entry.value_offset_bytes;

        match entry.field_type {
            FieldType::Undefined => {
                let size = entry.value_byte_size() as usize;
                Payload::InlineBytes(Bytes::copy_from_slice(&slot[..size]))
            }
            FieldType::Long if entry.tag == TAG_EXIF_IFD_POINTER => {
                let offset = endian.read_u32(slot);
                debug!(offset, "found Exif IFD pointer");
                self.ctx.exif_ifd_offset = Some(offset);
                Payload::Inline(decode_value(entry.tag, entry.field_type, slot, endian))
            }
            field_type => Payload::Inline(decode_value(entry.tag, field_type, slot, endian)),
        }
    }

    fn decode_indirect(&mut self, entry: &IfdEntry) -> Result<Payload, TiffError> {
        let endian = self.ctx.endian;
        let offset = entry.value_offset(endian);
        let size = entry.value_byte_size();
        let len = usize::try_from(size).map_err(|_| IoError::Allocation { requested: size })?;

        debug!(
            tag = entry.tag,
            offset,
            len,
            "reading indirect payload"
        );
        let bytes = self.reader.read_exact_at(self.ctx.absolute(offset), len)?;

        let data = match entry.field_type {
            FieldType::Ascii => IndirectData::Text(bytes),
            FieldType::Undefined => IndirectData::Bytes(bytes),
            field_type => IndirectData::Values(
                bytes
                    .chunks_exact(field_type.size_in_bytes())
                    .map(|element| decode_value(entry.tag, field_type, element, endian))
                    .collect(),
            ),
        };

        Ok(Payload::Indirect { offset, data })
    }
}

/// Decode a single element of `field_type` from file-order bytes.
///
/// Input shorter than the type's width (a zero-count entry routed through
/// the inline slot) and BYTE, SBYTE or unknown types fall back to the first
/// raw byte.
pub fn decode_value(tag: u16, field_type: FieldType, bytes: &[u8], endian: Endianness) -> Value {
    let first = bytes.first().copied().unwrap_or(0);
    if bytes.len() < field_type.size_in_bytes() {
        return Value::Raw(first);
    }

    match field_type {
        FieldType::Ascii => Value::Ascii(first),
        FieldType::Short => {
            let value = endian.read_u16(bytes);
            Value::Short {
                value,
                description: value_description(tag, u32::from(value)),
            }
        }
        FieldType::Long => {
            let value = endian.read_u32(bytes);
            Value::Long {
                value,
                description: value_description(tag, value),
            }
        }
        FieldType::Rational => Value::Rational {
            numerator: endian.read_u32(&bytes[0..4]),
            denominator: endian.read_u32(&bytes[4..8]),
        },
        FieldType::SRational => Value::SRational {
            numerator: endian.read_i32(&bytes[0..4]),
            denominator: endian.read_i32(&bytes[4..8]),
        },
        FieldType::SShort => Value::SShort(endian.read_i16(bytes)),
        FieldType::SLong => Value::SLong(endian.read_i32(bytes)),
        FieldType::Float => Value::Float(endian.read_f32(bytes)),
        FieldType::Double => Value::Double(endian.read_f64(bytes)),
        FieldType::Byte | FieldType::SByte | FieldType::Undefined | FieldType::Unknown(_) => {
            Value::Raw(first)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
