use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from a seekable input.
///
/// This abstraction lets the TIFF decoder fetch headers, directory records
/// and indirect payloads by absolute position without owning a cursor.
/// Implementations must leave the underlying stream position unchanged
/// after every call.
pub trait RangeReader {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns `IoError::ShortRead` if the range extends past the end of the
    /// input. No buffer is allocated for a range that cannot be satisfied.
    fn read_exact_at(&mut self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the input in bytes.
    fn size(&self) -> u64;

    /// Get a human-readable identifier for this input (for logging).
    fn identifier(&self) -> &str;

    /// Read up to `len` bytes starting at `offset`, stopping at end of input.
    fn read_prefix(&mut self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let available = self.size().saturating_sub(offset);
        if available == 0 {
            return Ok(Bytes::new());
        }
        let len = len.min(usize::try_from(available).unwrap_or(usize::MAX));
        self.read_exact_at(offset, len)
    }
}

impl<T: RangeReader + ?Sized> RangeReader for &mut T {
    fn read_exact_at(&mut self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        (**self).read_exact_at(offset, len)
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn identifier(&self) -> &str {
        (**self).identifier()
    }
}
