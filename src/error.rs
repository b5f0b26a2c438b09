use thiserror::Error;

/// I/O errors that can occur when reading the input or writing the dump
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// The input file could not be opened
    #[error("can't open {path} to read: {message}")]
    Open { path: String, message: String },

    /// Fewer bytes were available than requested
    #[error("short read: requested {requested} bytes at offset {offset}, only {available} available")]
    ShortRead {
        offset: u64,
        requested: u64,
        available: u64,
    },

    /// A payload buffer could not be allocated
    #[error("can't alloc buffer of {requested} bytes")]
    Allocation { requested: u64 },

    /// Any other read or seek failure
    #[error("read error: {0}")]
    Read(String),

    /// Failure writing the rendered dump
    #[error("write error: {0}")]
    Write(String),
}

/// Errors that can occur while decoding the TIFF structure
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Not enough bytes to hold a TIFF header
    #[error("file too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Byte order mark is neither II nor MM
    #[error("unsupported file type: byte order mark 0x{0:04X} is neither II nor MM")]
    UnsupportedByteOrder(u16),

    /// TIFF magic number is not 42
    #[error("bad magic number 0x{0:x}")]
    InvalidMagic(u16),

    /// An IFD chain points back to a directory it already visited
    #[error("IFD chain loops back to offset {0}")]
    IfdLoop(u32),
}

/// Errors related to container detection and the whole decode
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// TIFF parsing error
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    /// JPEG file without an APP1 Exif segment at the start
    #[error("JPEG file, but can't find Exif header")]
    MissingExifHeader,
}
