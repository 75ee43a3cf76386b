use std::io::Write;

use crate::buffer::PixelBuffer;
use crate::error::BmpError;

/// Encode configuration.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest {
    legacy_file_size: bool,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a file size 2 bytes larger than the bytes actually written.
    ///
    /// Reproduces the header of files written by the legacy tool byte for
    /// byte. Off by default, in which case the file-size field equals the
    /// encoded length.
    pub fn legacy_file_size(mut self, legacy: bool) -> Self {
        self.legacy_file_size = legacy;
        self
    }

    /// Encode to `writer`, flushing it on success.
    pub fn encode<W: Write>(&self, buffer: &PixelBuffer, mut writer: W) -> Result<(), BmpError> {
        crate::bmp::encode::encode_bmp(buffer, &mut writer, self.legacy_file_size)
    }

    /// Encode into a new byte vector.
    pub fn encode_to_vec(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode::encode_bmp_to_vec(buffer, self.legacy_file_size)
    }
}
