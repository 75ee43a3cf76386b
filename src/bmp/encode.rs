//! BMP encoder: uncompressed 24-bit, v3 header, bottom-up rows.

use std::io::Write;

use super::header::{
    BITS_PER_PIXEL, BMP_MAGIC, BmpFileLayout, DIB_HEADER_V3_SIZE, HEADER_SIZE, padded_row_bytes,
};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;

/// Extra bytes the legacy tool added to the declared file size.
const LEGACY_FILE_SIZE_SLACK: u64 = 2;

/// Build the header describing `buffer`.
pub(crate) fn layout_for(
    buffer: &PixelBuffer,
    legacy_file_size: bool,
) -> Result<BmpFileLayout, BmpError> {
    let (width, height) = (buffer.width(), buffer.height());
    let too_large = || BmpError::DimensionsTooLarge { width, height };

    let image_size = padded_row_bytes(width)
        .checked_mul(u64::from(height))
        .ok_or_else(too_large)?;
    let mut file_size = image_size + HEADER_SIZE as u64;
    if legacy_file_size {
        file_size += LEGACY_FILE_SIZE_SLACK;
    }

    Ok(BmpFileLayout {
        magic: BMP_MAGIC,
        file_size: u32::try_from(file_size).map_err(|_| too_large())?,
        reserved1: 0,
        reserved2: 0,
        data_offset: HEADER_SIZE as u32,
        dib_header_size: DIB_HEADER_V3_SIZE,
        width: i32::try_from(width).map_err(|_| too_large())?,
        // positive = bottom-up
        height: i32::try_from(height).map_err(|_| too_large())?,
        planes: 1,
        bits_per_pixel: BITS_PER_PIXEL,
        compression: 0,
        image_size: u32::try_from(image_size).map_err(|_| too_large())?,
        h_res: buffer.h_res(),
        v_res: buffer.v_res(),
        palette_colors: 0,
        important_colors: 0,
    })
}

/// Encode `buffer` to `writer` and flush it.
pub(crate) fn encode_bmp<W: Write>(
    buffer: &PixelBuffer,
    writer: &mut W,
    legacy_file_size: bool,
) -> Result<(), BmpError> {
    let layout = layout_for(buffer, legacy_file_size)?;
    writer.write_all(&layout.to_bytes()?)?;

    let row_bytes = buffer.width() as usize * 3;
    let pad = [0u8; 3];
    let pad_bytes = padded_row_bytes(buffer.width()) as usize - row_bytes;
    for y in (0..buffer.height()).rev() {
        writer.write_all(buffer.row(y))?;
        writer.write_all(&pad[..pad_bytes])?;
        log::trace!("bmp encode: buffer row {y}");
    }
    writer.flush()?;
    Ok(())
}

/// Encode `buffer` into a new byte vector.
pub(crate) fn encode_bmp_to_vec(
    buffer: &PixelBuffer,
    legacy_file_size: bool,
) -> Result<Vec<u8>, BmpError> {
    let layout = layout_for(buffer, legacy_file_size)?;
    let mut out = Vec::with_capacity(HEADER_SIZE + layout.image_size as usize);
    encode_bmp(buffer, &mut out, legacy_file_size)?;
    Ok(out)
}
