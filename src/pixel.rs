/// A single 24-bit color value.
///
/// Channel order in this type is irrelevant to storage; [`crate::PixelBuffer`]
/// keeps pixels in B,G,R byte order regardless.
pub type RgbPixel = rgb::RGB8;

/// One color channel of a 24-bit BGR pixel.
///
/// The discriminant is the byte offset of the channel within a stored pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    Blue = 0,
    Green = 1,
    Red = 2,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Blue, Channel::Green, Channel::Red];

    /// Byte offset of this channel within a stored pixel.
    #[inline]
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Read this channel from an [`RgbPixel`].
    #[inline]
    pub fn of(self, px: RgbPixel) -> u8 {
        match self {
            Channel::Blue => px.b,
            Channel::Green => px.g,
            Channel::Red => px.r,
        }
    }
}

/// Per-channel saturating addition.
pub fn add_pixel(a: RgbPixel, b: RgbPixel) -> RgbPixel {
    RgbPixel {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Decode a stored B,G,R triple.
#[inline]
pub(crate) fn from_bgr(bgr: &[u8]) -> RgbPixel {
    RgbPixel {
        r: bgr[2],
        g: bgr[1],
        b: bgr[0],
    }
}

/// Store a pixel as a B,G,R triple.
#[inline]
pub(crate) fn write_bgr(bgr: &mut [u8], px: RgbPixel) {
    bgr[0] = px.b;
    bgr[1] = px.g;
    bgr[2] = px.r;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_pixel_saturates() {
        let sum = add_pixel(RgbPixel::new(200, 0, 0), RgbPixel::new(100, 0, 0));
        assert_eq!(sum.r, 255);
        assert_eq!(sum.g, 0);
        assert_eq!(sum.b, 0);
    }

    #[test]
    fn add_pixel_below_max() {
        let sum = add_pixel(RgbPixel::new(10, 20, 30), RgbPixel::new(1, 2, 3));
        assert_eq!(sum, RgbPixel::new(11, 22, 33));
    }

    #[test]
    fn channel_offsets_match_bgr_storage() {
        assert_eq!(Channel::Blue.offset(), 0);
        assert_eq!(Channel::Green.offset(), 1);
        assert_eq!(Channel::Red.offset(), 2);

        let mut bgr = [0u8; 3];
        let px = RgbPixel::new(1, 2, 3);
        write_bgr(&mut bgr, px);
        assert_eq!(bgr, [3, 2, 1]);
        for ch in Channel::ALL {
            assert_eq!(bgr[ch.offset()], ch.of(px));
        }
        assert_eq!(from_bgr(&bgr), px);
    }
}
