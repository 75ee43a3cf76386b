use rgb::AsPixels as _;
use rgb::alt::BGR8;

use crate::error::BmpError;
use crate::pixel::{Channel, RgbPixel, from_bgr, write_bgr};

/// 300 pixels per inch, in pixels per meter.
pub const DEFAULT_RESOLUTION_PPM: u32 = 11811;

/// Largest buffer (in either dimension) that [`PixelBuffer::hex_dump`] prints.
const HEX_DUMP_MAX_DIM: u32 = 16;

/// Owned 24-bit image, row-major, top row first, pixels stored as B,G,R.
///
/// `data.len() == width * height * 3` at all times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    h_res: u32,
    v_res: u32,
    data: Vec<u8>,
}

pub(crate) fn storage_len(width: u32, height: u32) -> Result<usize, BmpError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

impl PixelBuffer {
    /// Allocate a zeroed (black) buffer at the default 300 ppi resolution.
    pub fn new(width: u32, height: u32) -> Result<Self, BmpError> {
        let len = storage_len(width, height)?;
        Ok(Self {
            width,
            height,
            h_res: DEFAULT_RESOLUTION_PPM,
            v_res: DEFAULT_RESOLUTION_PPM,
            data: vec![0u8; len],
        })
    }

    /// Like [`PixelBuffer::new`], but checks the requested pixel depth.
    ///
    /// Only 24 bits per pixel is supported.
    pub fn init(width: u32, height: u32, bits_per_pixel: u16) -> Result<Self, BmpError> {
        if bits_per_pixel != crate::bmp::header::BITS_PER_PIXEL {
            return Err(BmpError::UnsupportedPixelDepth {
                bpp: bits_per_pixel,
            });
        }
        Self::new(width, height)
    }

    /// Wrap existing B,G,R pixel data, top row first.
    pub fn from_bgr_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BmpError> {
        let expected = storage_len(width, height)?;
        if data.len() != expected {
            return Err(BmpError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            h_res: DEFAULT_RESOLUTION_PPM,
            v_res: DEFAULT_RESOLUTION_PPM,
            data,
        })
    }

    /// Release the pixel storage and reset to an empty 0x0 buffer.
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.h_res = DEFAULT_RESOLUTION_PPM;
        self.v_res = DEFAULT_RESOLUTION_PPM;
        self.data = Vec::new();
    }

    /// Make `self` an exact copy of `source`, reusing the existing allocation.
    pub fn clone_from_buffer(&mut self, source: &PixelBuffer) {
        self.clone_from(source);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Always 24.
    pub fn bits_per_pixel(&self) -> u16 {
        crate::bmp::header::BITS_PER_PIXEL
    }

    /// Horizontal resolution in pixels per meter.
    pub fn h_res(&self) -> u32 {
        self.h_res
    }

    /// Vertical resolution in pixels per meter.
    pub fn v_res(&self) -> u32 {
        self.v_res
    }

    /// Set horizontal and vertical resolution, in pixels per meter.
    pub fn set_resolution(&mut self, h_res: u32, v_res: u32) {
        self.h_res = h_res;
        self.v_res = v_res;
    }

    /// Raw B,G,R bytes, top row first, no row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes. The slice length is fixed, so dimensions stay consistent.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Typed view of the storage.
    pub fn as_bgr_pixels(&self) -> &[BGR8] {
        self.data.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, BGR8> {
        imgref::ImgRef::new(
            self.as_bgr_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// One stored row, unpadded.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| (y as usize * self.width as usize + x as usize) * 3)
    }

    /// Channel value at `(x, y)`, or `None` outside the buffer.
    pub fn try_get(&self, x: u32, y: u32, channel: Channel) -> Option<u8> {
        self.pixel_index(x, y)
            .map(|idx| self.data[idx + channel.offset()])
    }

    /// Channel value at `(x, y)`. Reads outside the buffer return 0.
    pub fn get(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.try_get(x, y, channel).unwrap_or(0)
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn try_get_pixel(&self, x: u32, y: u32) -> Option<RgbPixel> {
        self.pixel_index(x, y)
            .map(|idx| from_bgr(&self.data[idx..idx + 3]))
    }

    /// Pixel at `(x, y)`. Reads outside the buffer return black.
    pub fn get_pixel(&self, x: u32, y: u32) -> RgbPixel {
        self.try_get_pixel(x, y).unwrap_or_default()
    }

    /// Set one channel at `(x, y)`. Returns `false` and changes nothing when out of range.
    pub fn set(&mut self, x: u32, y: u32, channel: Channel, value: u8) -> bool {
        match self.pixel_index(x, y) {
            Some(idx) => {
                self.data[idx + channel.offset()] = value;
                true
            }
            None => false,
        }
    }

    /// Set the pixel at `(x, y)`. Returns `false` and changes nothing when out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: RgbPixel) -> bool {
        match self.pixel_index(x, y) {
            Some(idx) => {
                write_bgr(&mut self.data[idx..idx + 3], px);
                true
            }
            None => false,
        }
    }

    /// Set `channel` of every pixel to `value`.
    pub fn fill(&mut self, channel: Channel, value: u8) {
        for px in self.data.chunks_exact_mut(3) {
            px[channel.offset()] = value;
        }
    }

    /// Set every pixel to `px`.
    pub fn fill_pixel(&mut self, px: RgbPixel) {
        for bgr in self.data.chunks_exact_mut(3) {
            write_bgr(bgr, px);
        }
    }

    /// Bitwise-complement `channel` of every pixel.
    pub fn invert(&mut self, channel: Channel) {
        for px in self.data.chunks_exact_mut(3) {
            px[channel.offset()] ^= 0xFF;
        }
    }

    /// Bitwise-complement every channel of every pixel.
    pub fn invert_all(&mut self) {
        for b in &mut self.data {
            *b ^= 0xFF;
        }
    }

    /// Hex listing of small buffers, one line per row.
    ///
    /// Each row starts with its first pixel index (`y * width`, 4 hex digits)
    /// followed by `BB.GG.RR` per pixel. Returns `None` for buffers wider or
    /// taller than 16 pixels.
    pub fn hex_dump(&self) -> Option<String> {
        if self.width > HEX_DUMP_MAX_DIM || self.height > HEX_DUMP_MAX_DIM {
            return None;
        }
        let mut out = String::new();
        for y in 0..self.height {
            out.push_str(&format!("{:04X}:: ", y * self.width));
            for bgr in self.row(y).chunks_exact(3) {
                out.push_str(&format!("{:02X}.{:02X}.{:02X} ", bgr[0], bgr[1], bgr[2]));
            }
            out.push('\n');
        }
        out.push('\n');
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                buf.set_pixel(x, y, RgbPixel::new(x as u8, y as u8, (x + y) as u8));
            }
        }
        buf
    }

    #[test]
    fn new_buffer_is_black_with_default_resolution() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.as_bytes().len(), 18);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.bits_per_pixel(), 24);
        assert_eq!(buf.h_res(), 11811);
        assert_eq!(buf.v_res(), 11811);
    }

    #[test]
    fn init_rejects_other_depths() {
        assert!(PixelBuffer::init(2, 2, 24).is_ok());
        assert!(matches!(
            PixelBuffer::init(2, 2, 8),
            Err(BmpError::UnsupportedPixelDepth { bpp: 8 })
        ));
    }

    #[test]
    fn storage_index_is_bgr_row_major() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        assert!(buf.set(2, 1, Channel::Red, 0xAB));
        assert!(buf.set(2, 1, Channel::Blue, 0xCD));
        let idx = (4 + 2) * 3;
        assert_eq!(buf.as_bytes()[idx], 0xCD);
        assert_eq!(buf.as_bytes()[idx + 1], 0);
        assert_eq!(buf.as_bytes()[idx + 2], 0xAB);
        assert_eq!(buf.get_pixel(2, 1), RgbPixel::new(0xAB, 0, 0xCD));
        assert_eq!(buf.as_bgr_pixels()[4 + 2], BGR8 { b: 0xCD, g: 0, r: 0xAB });
    }

    #[test]
    fn out_of_range_access_is_a_no_op() {
        let mut buf = gradient(3, 3);
        let before = buf.clone();

        assert_eq!(buf.get(3, 0, Channel::Red), 0);
        assert_eq!(buf.get(0, 3, Channel::Green), 0);
        assert_eq!(buf.get_pixel(u32::MAX, u32::MAX), RgbPixel::default());
        assert_eq!(buf.try_get(3, 0, Channel::Red), None);
        assert_eq!(buf.try_get_pixel(0, 3), None);

        assert!(!buf.set(3, 0, Channel::Red, 0xFF));
        assert!(!buf.set(0, 3, Channel::Blue, 0xFF));
        assert!(!buf.set_pixel(5, 5, RgbPixel::new(1, 2, 3)));
        assert_eq!(buf, before);
    }

    #[test]
    fn fill_touches_only_one_channel() {
        let mut buf = gradient(4, 2);
        let before = buf.clone();
        buf.fill(Channel::Green, 77);
        for y in 0..2 {
            for x in 0..4 {
                let px = buf.get_pixel(x, y);
                let old = before.get_pixel(x, y);
                assert_eq!(px.g, 77);
                assert_eq!(px.r, old.r);
                assert_eq!(px.b, old.b);
            }
        }
    }

    #[test]
    fn invert_twice_is_identity() {
        let mut buf = gradient(5, 4);
        let before = buf.clone();
        buf.invert(Channel::Blue);
        assert_eq!(buf.get(1, 2, Channel::Blue), before.get(1, 2, Channel::Blue) ^ 0xFF);
        assert_eq!(buf.get(1, 2, Channel::Red), before.get(1, 2, Channel::Red));
        buf.invert(Channel::Blue);
        assert_eq!(buf, before);

        buf.invert_all();
        buf.invert_all();
        assert_eq!(buf, before);
    }

    #[test]
    fn invert_covers_non_square_buffers() {
        let mut buf = PixelBuffer::new(7, 2).unwrap();
        buf.invert(Channel::Red);
        for y in 0..2 {
            for x in 0..7 {
                assert_eq!(buf.get(x, y, Channel::Red), 0xFF, "({x},{y})");
            }
        }
    }

    #[test]
    fn clone_is_independent() {
        let src = gradient(3, 2);
        let mut copy = src.clone();
        copy.set_pixel(0, 0, RgbPixel::new(9, 9, 9));
        assert_ne!(copy, src);
        assert_eq!(src.get_pixel(0, 0), RgbPixel::new(0, 0, 0));

        let mut target = PixelBuffer::new(1, 1).unwrap();
        target.clone_from_buffer(&src);
        assert_eq!(target, src);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut buf = gradient(3, 3);
        buf.set_resolution(2835, 2835);
        buf.clear();
        assert_eq!(buf.width(), 0);
        assert_eq!(buf.height(), 0);
        assert!(buf.as_bytes().is_empty());
        assert_eq!(buf.h_res(), DEFAULT_RESOLUTION_PPM);
        assert_eq!(buf.get_pixel(0, 0), RgbPixel::default());
    }

    #[test]
    fn from_bgr_bytes_checks_length() {
        assert!(PixelBuffer::from_bgr_bytes(2, 2, vec![0; 12]).is_ok());
        assert!(matches!(
            PixelBuffer::from_bgr_bytes(2, 2, vec![0; 11]),
            Err(BmpError::BufferSizeMismatch {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn hex_dump_format() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set_pixel(1, 0, RgbPixel::new(0x01, 0x02, 0x03));
        buf.set_pixel(0, 1, RgbPixel::new(0xFF, 0x00, 0xAB));
        let dump = buf.hex_dump().unwrap();
        assert_eq!(
            dump,
            "0000:: 00.00.00 03.02.01 \n0002:: AB.00.FF 00.00.00 \n\n"
        );
        assert!(PixelBuffer::new(17, 1).unwrap().hex_dump().is_none());
    }
}
