use std::io::{Cursor, Read, Seek};

use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::limits::Limits;

/// Decode configuration.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits};
///
/// let file = std::fs::File::open("in.bmp")?;
/// let buf = DecodeRequest::new()
///     .with_limits(Limits {
///         max_pixels: Some(64 * 1024 * 1024),
///         ..Default::default()
///     })
///     .decode(std::io::BufReader::new(file))?;
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest {
    limits: Option<Limits>,
    honor_top_down: bool,
}

impl DecodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images exceeding `limits` before allocating pixel storage.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read rows top-down when the header height is negative.
    ///
    /// Off by default: the sign of the height is discarded and stored rows
    /// are always treated as bottom-up, matching files produced by the
    /// legacy tool.
    pub fn honor_top_down(mut self, honor: bool) -> Self {
        self.honor_top_down = honor;
        self
    }

    /// Decode from a seekable byte source.
    pub fn decode<R: Read + Seek>(&self, mut reader: R) -> Result<PixelBuffer, BmpError> {
        crate::bmp::decode::decode_bmp(&mut reader, self.limits.as_ref(), self.honor_top_down)
    }

    /// Decode from an in-memory file image.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<PixelBuffer, BmpError> {
        self.decode(Cursor::new(data))
    }
}
