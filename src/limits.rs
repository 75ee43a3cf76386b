use crate::error::BmpError;

/// Resource limits for BMP decoding.
///
/// All fields default to `None` (no limit). Limits are checked after the
/// header has been parsed and before any pixel storage is allocated or any
/// pixel row is read.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the unpadded B,G,R pixel buffer.
    pub max_memory_bytes: Option<u64>,
    /// Maximum bytes the header may ask to be read: data offset plus every
    /// padded row.
    pub max_stream_bytes: Option<u64>,
}

fn exceeds(value: u64, limit: Option<u64>) -> Option<u64> {
    limit.filter(|&max| value > max)
}

impl Limits {
    /// Check header dimensions (absolute values) before anything is allocated.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if let Some(max) = exceeds(u64::from(width), self.max_width) {
            return Err(BmpError::LimitExceeded(format!(
                "BMP width {width} exceeds limit {max}"
            )));
        }
        if let Some(max) = exceeds(u64::from(height), self.max_height) {
            return Err(BmpError::LimitExceeded(format!(
                "BMP height {height} exceeds limit {max}"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = exceeds(pixels, self.max_pixels) {
            return Err(BmpError::LimitExceeded(format!(
                "BMP {width}x{height} has {pixels} pixels, limit {max}"
            )));
        }
        Ok(())
    }

    /// Check the decoded buffer size and the padded on-disk extent.
    pub(crate) fn check_sizes(
        &self,
        buffer_bytes: usize,
        stream_bytes: u64,
    ) -> Result<(), BmpError> {
        if let Some(max) = exceeds(buffer_bytes as u64, self.max_memory_bytes) {
            return Err(BmpError::LimitExceeded(format!(
                "BMP pixel buffer of {buffer_bytes} bytes exceeds memory limit {max}"
            )));
        }
        if let Some(max) = exceeds(stream_bytes, self.max_stream_bytes) {
            return Err(BmpError::LimitExceeded(format!(
                "BMP pixel data ends at byte {stream_bytes}, stream limit {max}"
            )));
        }
        Ok(())
    }
}
