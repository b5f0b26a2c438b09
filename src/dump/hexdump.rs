//! Canonical hex+ASCII dump.
//!
//! ```text
//! 00000000  30 32 32 30 01 02 03 00 41 42 43 44 45 46 47 48  |0220....ABCDEFGH|
//! 00000010  49 4a                                            |IJ|
//! 00000012
//! ```

use std::fmt::Write;

use crate::ascii::is_printable;

const BYTES_PER_LINE: usize = 16;

/// Render `bytes` as 16-byte lines followed by a line holding the length.
///
/// Every line, including the last, ends with a newline.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() / BYTES_PER_LINE + 2) * 80);

    for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let _ = write!(out, "{:08x}  ", line * BYTES_PER_LINE);

        for (i, byte) in chunk.iter().enumerate() {
            if i == BYTES_PER_LINE - 1 {
                let _ = write!(out, "{:02x}  |", byte);
            } else {
                let _ = write!(out, "{:02x} ", byte);
            }
        }

        if chunk.len() < BYTES_PER_LINE {
            for _ in chunk.len()..BYTES_PER_LINE - 1 {
                out.push_str("   ");
            }
            out.push_str("    |");
        }

        out.extend(chunk.iter().map(|&b| if is_printable(b) { b as char } else { '.' }));
        out.push_str("|\n");
    }

    let _ = writeln!(out, "{:08x}", bytes.len());
    out
}
