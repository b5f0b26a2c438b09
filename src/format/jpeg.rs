//! JPEG container handling.
//!
//! A JPEG file carries Exif metadata in an APP1 segment placed right after
//! the Start Of Image marker:
//!
//! ```text
//! Bytes 0-1:   SOI  (FF D8)
//! Bytes 2-3:   APP1 (FF E1)
//! Bytes 4-5:   Segment length (big-endian, includes these 2 bytes)
//! Bytes 6-11:  "Exif\0\0"
//! Bytes 12-:   TIFF header and IFDs
//! ```
//!
//! Only this common layout is recognized; the APP1 segment must be the
//! first segment in the file.

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Application segment 1 (Exif) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Signature opening the APP1 payload
pub const EXIF_SIGNATURE: &[u8; 4] = b"Exif";

/// Position of the embedded TIFF header within the file
pub const EXIF_TIFF_OFFSET: u64 = 12;

// =============================================================================
// JPEG Stream Analysis
// =============================================================================

/// Check if data starts with the JPEG SOI marker.
#[inline]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&SOI)
}

/// Locate the embedded TIFF header of a JPEG file.
///
/// Returns `None` unless the file starts with SOI, APP1 and the "Exif"
/// signature.
pub fn exif_tiff_offset(data: &[u8]) -> Option<u64> {
    let is_exif_app1 = is_jpeg(data)
        && data.get(2..4) == Some(&APP1[..])
        && data.get(6..10) == Some(&EXIF_SIGNATURE[..]);
    is_exif_app1.then_some(EXIF_TIFF_OFFSET)
}

/// Length field of the leading APP1 segment, if present.
pub fn app1_length(data: &[u8]) -> Option<u16> {
    if data.get(2..4) != Some(&APP1[..]) {
        return None;
    }
    data.get(4..6).map(|len| u16::from_be_bytes([len[0], len[1]]))
}
