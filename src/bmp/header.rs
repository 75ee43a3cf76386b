//! BMP file header (14-byte file header + 40-byte BITMAPINFOHEADER).
//!
//! All multi-byte fields are little-endian and live at fixed offsets within
//! the 54-byte header block.

use crate::error::BmpError;

/// Total header size: 14-byte file header plus 40-byte v3 DIB header.
pub const HEADER_SIZE: usize = 54;
/// DIB header size of the BITMAPINFOHEADER (v3) variant.
pub const DIB_HEADER_V3_SIZE: u32 = 40;
/// `"BM"` read as a little-endian u16.
pub const BMP_MAGIC: u16 = 0x4D42;
/// The only supported pixel depth.
pub const BITS_PER_PIXEL: u16 = 24;

pub const MAGIC_OFFSET: usize = 0;
pub const FILE_SIZE_OFFSET: usize = 2;
pub const RESERVED1_OFFSET: usize = 6;
pub const RESERVED2_OFFSET: usize = 8;
pub const DATA_OFFSET_OFFSET: usize = 10;
pub const DIB_HEADER_SIZE_OFFSET: usize = 14;
pub const WIDTH_OFFSET: usize = 18;
pub const HEIGHT_OFFSET: usize = 22;
pub const PLANES_OFFSET: usize = 26;
pub const BPP_OFFSET: usize = 28;
pub const COMPRESSION_OFFSET: usize = 30;
pub const IMAGE_SIZE_OFFSET: usize = 34;
pub const H_RES_OFFSET: usize = 38;
pub const V_RES_OFFSET: usize = 42;
pub const PALETTE_COLORS_OFFSET: usize = 46;
pub const IMPORTANT_COLORS_OFFSET: usize = 50;

fn field_range(
    len: usize,
    offset: usize,
    size: usize,
) -> Result<core::ops::Range<usize>, BmpError> {
    if size > 4 {
        return Err(BmpError::FieldSizeOutOfRange { size });
    }
    let end = offset
        .checked_add(size)
        .filter(|&end| end <= len)
        .ok_or(BmpError::FieldOutOfBounds { offset, size, len })?;
    Ok(offset..end)
}

/// Read `size` (at most 4) bytes at `offset` as a little-endian unsigned value.
pub fn read_field(bytes: &[u8], offset: usize, size: usize) -> Result<u32, BmpError> {
    let range = field_range(bytes.len(), offset, size)?;
    Ok(bytes[range]
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i))))
}

/// Write the low `size` (at most 4) bytes of `value` at `offset`, little-endian.
///
/// Nothing is written when the size or range is invalid.
pub fn write_field(
    bytes: &mut [u8],
    value: u32,
    offset: usize,
    size: usize,
) -> Result<(), BmpError> {
    let range = field_range(bytes.len(), offset, size)?;
    bytes[range].copy_from_slice(&value.to_le_bytes()[..size]);
    Ok(())
}

/// Bytes per stored row: `width * 3` rounded up to a multiple of 4.
pub fn padded_row_bytes(width: u32) -> u64 {
    (u64::from(width) * 3 + 3) & !3
}

/// [`padded_row_bytes`] as a `usize`, or `None` if it does not fit.
pub fn checked_padded_row_bytes(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Every field of the 54-byte header block.
///
/// Only lives for the duration of one decode or encode call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpFileLayout {
    pub magic: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
    pub dib_header_size: u32,
    /// Negative width is nonsensical but tolerated; its absolute value is used.
    pub width: i32,
    /// Negative height marks top-down row order.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub h_res: u32,
    /// Vertical resolution in pixels per meter.
    pub v_res: u32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl BmpFileLayout {
    /// Unpack every field of a header block. Performs no validation.
    pub fn parse(header: &[u8; HEADER_SIZE]) -> Result<Self, BmpError> {
        let h = &header[..];
        Ok(Self {
            magic: read_field(h, MAGIC_OFFSET, 2)? as u16,
            file_size: read_field(h, FILE_SIZE_OFFSET, 4)?,
            reserved1: read_field(h, RESERVED1_OFFSET, 2)? as u16,
            reserved2: read_field(h, RESERVED2_OFFSET, 2)? as u16,
            data_offset: read_field(h, DATA_OFFSET_OFFSET, 4)?,
            dib_header_size: read_field(h, DIB_HEADER_SIZE_OFFSET, 4)?,
            width: read_field(h, WIDTH_OFFSET, 4)? as i32,
            height: read_field(h, HEIGHT_OFFSET, 4)? as i32,
            planes: read_field(h, PLANES_OFFSET, 2)? as u16,
            bits_per_pixel: read_field(h, BPP_OFFSET, 2)? as u16,
            compression: read_field(h, COMPRESSION_OFFSET, 4)?,
            image_size: read_field(h, IMAGE_SIZE_OFFSET, 4)?,
            h_res: read_field(h, H_RES_OFFSET, 4)?,
            v_res: read_field(h, V_RES_OFFSET, 4)?,
            palette_colors: read_field(h, PALETTE_COLORS_OFFSET, 4)?,
            important_colors: read_field(h, IMPORTANT_COLORS_OFFSET, 4)?,
        })
    }

    /// Check magic number, header version and pixel depth, in that order.
    pub fn validate(&self) -> Result<(), BmpError> {
        if self.magic != BMP_MAGIC {
            return Err(BmpError::InvalidMagicNumber { found: self.magic });
        }
        if self.dib_header_size != DIB_HEADER_V3_SIZE {
            return Err(BmpError::UnsupportedHeaderVersion {
                size: self.dib_header_size,
            });
        }
        if self.bits_per_pixel != BITS_PER_PIXEL {
            return Err(BmpError::UnsupportedPixelDepth {
                bpp: self.bits_per_pixel,
            });
        }
        Ok(())
    }

    /// Pack every field into a header block.
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE], BmpError> {
        let mut out = [0u8; HEADER_SIZE];
        let h = &mut out[..];
        write_field(h, u32::from(self.magic), MAGIC_OFFSET, 2)?;
        write_field(h, self.file_size, FILE_SIZE_OFFSET, 4)?;
        write_field(h, u32::from(self.reserved1), RESERVED1_OFFSET, 2)?;
        write_field(h, u32::from(self.reserved2), RESERVED2_OFFSET, 2)?;
        write_field(h, self.data_offset, DATA_OFFSET_OFFSET, 4)?;
        write_field(h, self.dib_header_size, DIB_HEADER_SIZE_OFFSET, 4)?;
        write_field(h, self.width as u32, WIDTH_OFFSET, 4)?;
        write_field(h, self.height as u32, HEIGHT_OFFSET, 4)?;
        write_field(h, u32::from(self.planes), PLANES_OFFSET, 2)?;
        write_field(h, u32::from(self.bits_per_pixel), BPP_OFFSET, 2)?;
        write_field(h, self.compression, COMPRESSION_OFFSET, 4)?;
        write_field(h, self.image_size, IMAGE_SIZE_OFFSET, 4)?;
        write_field(h, self.h_res, H_RES_OFFSET, 4)?;
        write_field(h, self.v_res, V_RES_OFFSET, 4)?;
        write_field(h, self.palette_colors, PALETTE_COLORS_OFFSET, 4)?;
        write_field(h, self.important_colors, IMPORTANT_COLORS_OFFSET, 4)?;
        Ok(out)
    }

    /// Absolute width in pixels.
    pub fn abs_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Absolute height in pixels.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Whether the header declares top-down row order.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }
}
