use std::io;

/// Errors from BMP decoding, encoding and header field access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("invalid magic number 0x{found:04X}, expected \"BM\"")]
    InvalidMagicNumber { found: u16 },

    #[error("unsupported DIB header size {size}, only the 40-byte v3 header is supported")]
    UnsupportedHeaderVersion { size: u32 },

    #[error("unsupported pixel depth {bpp} bpp, only 24 bpp is supported")]
    UnsupportedPixelDepth { bpp: u16 },

    #[error("unexpected end of data")]
    UnexpectedEndOfData,

    #[error("I/O failure: {0}")]
    Io(#[source] io::Error),

    #[error("header field size {size} exceeds 4 bytes")]
    FieldSizeOutOfRange { size: usize },

    #[error("header field at offset {offset} with size {size} exceeds buffer of {len} bytes")]
    FieldOutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel data size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl From<io::Error> for BmpError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => BmpError::UnexpectedEndOfData,
            _ => BmpError::Io(e),
        }
    }
}
