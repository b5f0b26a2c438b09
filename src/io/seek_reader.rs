use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use tracing::trace;

use super::RangeReader;
use crate::error::IoError;

/// RangeReader over any `Read + Seek` source, usually an open file.
///
/// Every read saves the current stream position, seeks to the requested
/// offset, reads, and seeks back, so callers never observe a moved cursor.
/// The size is taken once on creation.
pub struct SeekReader<R> {
    inner: R,
    size: u64,
    identifier: String,
}

impl SeekReader<File> {
    /// Open a file for range reads.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let file = File::open(path).map_err(|e| IoError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::new(file, path.display().to_string())
    }
}

impl<R: Read + Seek> SeekReader<R> {
    /// Wrap a seekable source. The source's current position is preserved.
    pub fn new(mut inner: R, identifier: impl Into<String>) -> Result<Self, IoError> {
        let saved = inner.stream_position().map_err(read_error)?;
        let size = inner.seek(SeekFrom::End(0)).map_err(read_error)?;
        inner.seek(SeekFrom::Start(saved)).map_err(read_error)?;

        Ok(Self {
            inner,
            size,
            identifier: identifier.into(),
        })
    }

    /// Current position of the underlying stream.
    pub fn position(&mut self) -> Result<u64, IoError> {
        self.inner.stream_position().map_err(read_error)
    }
}

impl<R: Read + Seek> RangeReader for SeekReader<R> {
    fn read_exact_at(&mut self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let requested = len as u64;
        let in_bounds = offset
            .checked_add(requested)
            .is_some_and(|end| end <= self.size);
        if !in_bounds {
            return Err(IoError::ShortRead {
                offset,
                requested,
                available: self.size.saturating_sub(offset),
            });
        }

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| IoError::Allocation { requested })?;
        buf.resize(len, 0);

        trace!(offset, len, source = %self.identifier, "range read");

        let saved = self.inner.stream_position().map_err(read_error)?;
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(read_error)?;
        let result = self.inner.read_exact(&mut buf);
        self.inner
            .seek(SeekFrom::Start(saved))
            .map_err(read_error)?;

        match result {
            Ok(()) => Ok(Bytes::from(buf)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(IoError::ShortRead {
                offset,
                requested,
                available: self.size.saturating_sub(offset),
            }),
            Err(e) => Err(read_error(e)),
        }
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

fn read_error(err: std::io::Error) -> IoError {
    IoError::Read(err.to_string())
}
