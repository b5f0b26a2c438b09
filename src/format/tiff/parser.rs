//! TIFF header, byte order and raw directory entry parsing.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order ("II" = little-endian, "MM" = big-endian)
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD, relative to the header
//! ```
//!
//! # IFD Entry Structure (12 bytes)
//! ```text
//! Bytes 0-1:  Tag
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Count (number of values, not bytes)
//! Bytes 8-11: Value, left-justified, or offset to the value
//! ```
//!
//! Multi-byte quantities are decoded by reading the raw bytes in host order
//! and byte-swapping when the host and file orders differ.

use crate::error::TiffError;

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// Byte order mark for little-endian files ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: [u8; 2] = *b"II";

/// Byte order mark for big-endian files ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: [u8; 2] = *b"MM";

/// The fixed TIFF magic number
pub const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of an IFD entry record in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the next IFD offset field at the end of an IFD
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF file or of the decoding host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the host running the decoder.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// The opposite byte order.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
        }
    }

    /// Detect the byte order from a two-byte mark.
    pub fn from_mark(mark: [u8; 2]) -> Option<Self> {
        match mark {
            BYTE_ORDER_LITTLE_ENDIAN => Some(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Human-readable description used in the dump header.
    pub const fn description(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Intel (little-endian)",
            ByteOrder::BigEndian => "Motorola (big-endian)",
        }
    }
}

// =============================================================================
// Endianness
// =============================================================================

/// The pair of byte orders that matter while decoding: the host's and the
/// file's. A value is swapped if and only if they differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endianness {
    pub machine: ByteOrder,
    pub file: ByteOrder,
}

impl Endianness {
    pub const fn new(machine: ByteOrder, file: ByteOrder) -> Self {
        Self { machine, file }
    }

    /// Endianness for decoding a file of the given order on this host.
    pub const fn for_file(file: ByteOrder) -> Self {
        Self::new(ByteOrder::native(), file)
    }

    #[inline]
    pub fn needs_swap(self) -> bool {
        self.machine != self.file
    }

    #[inline]
    pub fn swap_u16(self, value: u16) -> u16 {
        if self.needs_swap() {
            value.swap_bytes()
        } else {
            value
        }
    }

    #[inline]
    pub fn swap_u32(self, value: u32) -> u32 {
        if self.needs_swap() {
            value.swap_bytes()
        } else {
            value
        }
    }

    #[inline]
    pub fn swap_u64(self, value: u64) -> u64 {
        if self.needs_swap() {
            value.swap_bytes()
        } else {
            value
        }
    }

    /// Swap a signed 32-bit value through its unsigned bit pattern.
    #[inline]
    pub fn swap_i32(self, value: i32) -> i32 {
        self.swap_u32(value as u32) as i32
    }

    /// Swap a 32-bit float through its bit pattern. NaN payloads survive.
    #[inline]
    pub fn swap_f32(self, value: f32) -> f32 {
        f32::from_bits(self.swap_u32(value.to_bits()))
    }

    #[inline]
    pub fn swap_f64(self, value: f64) -> f64 {
        f64::from_bits(self.swap_u64(value.to_bits()))
    }

    /// Decode a u16 from the first 2 bytes of a file-order slice.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 2 bytes.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        self.swap_u16(u16::from_ne_bytes([bytes[0], bytes[1]]))
    }

    /// Decode a u32 from the first 4 bytes of a file-order slice.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 4 bytes.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        self.swap_u32(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    pub fn read_i16(self, bytes: &[u8]) -> i16 {
        self.read_u16(bytes) as i16
    }

    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.swap_i32(i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    pub fn read_f32(self, bytes: &[u8]) -> f32 {
        self.swap_f32(f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Decode an f64 from the first 8 bytes of a file-order slice.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 8 bytes.
    #[inline]
    pub fn read_f64(self, bytes: &[u8]) -> f64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        self.swap_f64(f64::from_ne_bytes(raw))
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the file
    pub byte_order: ByteOrder,

    /// Magic number after byte-order correction (always 42 once parsed)
    pub magic: u16,

    /// Offset to the first IFD, relative to the start of the header
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from raw bytes.
    ///
    /// # Errors
    /// - `FileTooSmall` if fewer than 8 bytes are given
    /// - `UnsupportedByteOrder` if the byte order mark is not II or MM
    /// - `InvalidMagic` if the magic number is not 42
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let mark = [bytes[0], bytes[1]];
        let byte_order = ByteOrder::from_mark(mark)
            .ok_or(TiffError::UnsupportedByteOrder(u16::from_be_bytes(mark)))?;
        let endian = Endianness::for_file(byte_order);

        let magic = endian.read_u16(&bytes[2..4]);
        if magic != TIFF_MAGIC {
            return Err(TiffError::InvalidMagic(magic));
        }

        Ok(TiffHeader {
            byte_order,
            magic,
            first_ifd_offset: endian.read_u32(&bytes[4..8]),
        })
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A raw 12-byte directory entry with its fixed fields decoded.
///
/// The value slot is kept exactly as stored in the file so that inline
/// values can be decoded per field type later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag: u16,
    pub field_type: FieldType,
    pub field_type_raw: u16,
    pub count: u32,
    pub value_offset_bytes: [u8; 4],
}

impl IfdEntry {
    /// Decode the tag, type and count of a raw record.
    pub fn parse(record: &[u8; IFD_ENTRY_SIZE], endian: Endianness) -> Self {
        let field_type_raw = endian.read_u16(&record[2..4]);
        IfdEntry {
            tag: endian.read_u16(&record[0..2]),
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count: endian.read_u32(&record[4..8]),
            value_offset_bytes: [record[8], record[9], record[10], record[11]],
        }
    }

    /// Total payload size in bytes. Unknown field types always give 0.
    #[inline]
    pub fn value_byte_size(&self) -> u64 {
        self.field_type.size_in_bytes() as u64 * u64::from(self.count)
    }

    /// Whether the payload is stored in the value slot itself.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.field_type.fits_inline(self.count)
    }

    /// Interpret the value slot as an offset.
    #[inline]
    pub fn value_offset(&self, endian: Endianness) -> u32 {
        endian.read_u32(&self.value_offset_bytes)
    }
}

// =============================================================================
// Tests
// =============================================================================
