//! 24-bit v3 BMP decoder over any `Read + Seek` source.

use std::io::{Read, Seek, SeekFrom};

use super::header::{BmpFileLayout, HEADER_SIZE, checked_padded_row_bytes, padded_row_bytes};
use crate::buffer::{PixelBuffer, storage_len};
use crate::error::BmpError;
use crate::limits::Limits;

/// Approximate pixels per inch for a pixels-per-meter value (log output only).
fn approx_ppi(ppm: u32) -> u32 {
    ppm / 39
}

/// Read and validate the header block.
pub(crate) fn read_header<R: Read>(reader: &mut R) -> Result<BmpFileLayout, BmpError> {
    let mut block = [0u8; HEADER_SIZE];
    reader.read_exact(&mut block)?;
    let layout = BmpFileLayout::parse(&block)?;
    layout.validate()?;

    log::debug!(
        "bmp header: file size {} bytes, data at 0x{:04x}, {}x{} ({}), {} bpp, \
         res {}x{} ppm (~{}x{} ppi)",
        layout.file_size,
        layout.data_offset,
        layout.abs_width(),
        layout.abs_height(),
        if layout.is_top_down() { "top-down" } else { "bottom-up" },
        layout.bits_per_pixel,
        layout.h_res,
        layout.v_res,
        approx_ppi(layout.h_res),
        approx_ppi(layout.v_res),
    );
    Ok(layout)
}

/// Decode a complete image. No buffer escapes unless every row was read.
pub(crate) fn decode_bmp<R: Read + Seek>(
    reader: &mut R,
    limits: Option<&Limits>,
    honor_top_down: bool,
) -> Result<PixelBuffer, BmpError> {
    let layout = read_header(reader)?;
    let width = layout.abs_width();
    let height = layout.abs_height();

    let padded = checked_padded_row_bytes(width)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let row_bytes = width as usize * 3;
    let out_bytes = storage_len(width, height)?;
    let data_end = padded_row_bytes(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_add(u64::from(layout.data_offset)))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_dimensions(width, height)?;
        limits.check_sizes(out_bytes, data_end)?;
    }
    log::debug!("bmp rows: {row_bytes} data bytes + {} pad bytes", padded - row_bytes);

    // Reject truncated streams before allocating anything sized by the header.
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if data_end > stream_len {
        return Err(BmpError::UnexpectedEndOfData);
    }

    let mut buffer = PixelBuffer::new(width, height)?;
    buffer.set_resolution(layout.h_res, layout.v_res);

    // no pixel bytes to read; a zero-width image may still declare 2^31 rows
    if row_bytes == 0 || height == 0 {
        return Ok(buffer);
    }

    reader.seek(SeekFrom::Start(u64::from(layout.data_offset)))?;
    let mut scratch = vec![0u8; padded];
    let top_down = honor_top_down && layout.is_top_down();
    for file_row in 0..height {
        reader.read_exact(&mut scratch)?;
        let y = if top_down {
            file_row
        } else {
            height - 1 - file_row
        };
        buffer.row_mut(y).copy_from_slice(&scratch[..row_bytes]);
        log::trace!("bmp decode: file row {file_row} -> buffer row {y}");
    }

    Ok(buffer)
}
