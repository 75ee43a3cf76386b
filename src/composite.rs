//! Region compositing: overlay, chroma-key mask and saturating add.
//!
//! Each operation places a source buffer onto `self` at a signed offset and
//! clips against `self`'s bounds. The return value is `true` when part of
//! the source fell outside the destination.

use core::ops::Range;

use crate::buffer::PixelBuffer;
use crate::pixel::{RgbPixel, from_bgr};

/// Destination coordinates covered by `len` source samples starting at `offset`.
fn visible_span(offset: i64, len: u32, limit: u32) -> Range<i64> {
    let start = offset.max(0);
    let end = offset.saturating_add(i64::from(len)).min(i64::from(limit));
    start..end.max(start)
}

impl PixelBuffer {
    fn composite_with<F>(&mut self, source: &PixelBuffer, x: i64, y: i64, mut op: F) -> bool
    where
        F: FnMut(&mut [u8], &[u8]),
    {
        let cols = visible_span(x, source.width(), self.width());
        let rows = visible_span(y, source.height(), self.height());
        let visible_w = (cols.end - cols.start) as u64;
        let visible_h = (rows.end - rows.start) as u64;
        let clipped =
            visible_w < u64::from(source.width()) || visible_h < u64::from(source.height());
        if visible_w == 0 || visible_h == 0 {
            return clipped;
        }

        let src_x0 = (cols.start - x) as usize * 3;
        let dst_x0 = cols.start as usize * 3;
        let span = visible_w as usize * 3;
        for dy in rows {
            let sy = (dy - y) as u32;
            let src = &source.row(sy)[src_x0..src_x0 + span];
            let dst = &mut self.row_mut(dy as u32)[dst_x0..dst_x0 + span];
            for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                op(d, s);
            }
        }
        clipped
    }

    /// Copy every pixel of `source` onto `self` with its top-left corner at `(x, y)`.
    pub fn overlay(&mut self, source: &PixelBuffer, x: i64, y: i64) -> bool {
        self.composite_with(source, x, y, |d, s| d.copy_from_slice(s))
    }

    /// Like [`overlay`](Self::overlay), but source pixels equal to `mask_color` are skipped.
    pub fn mask(&mut self, source: &PixelBuffer, x: i64, y: i64, mask_color: RgbPixel) -> bool {
        self.composite_with(source, x, y, |d, s| {
            if from_bgr(s) != mask_color {
                d.copy_from_slice(s);
            }
        })
    }

    /// Add `source` onto `self` per channel, saturating at 255.
    pub fn add(&mut self, source: &PixelBuffer, x: i64, y: i64) -> bool {
        self.composite_with(source, x, y, |d, s| {
            for (d, &s) in d.iter_mut().zip(s) {
                *d = d.saturating_add(s);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_span_clips_both_edges() {
        assert_eq!(visible_span(0, 4, 10), 0..4);
        assert_eq!(visible_span(-2, 4, 10), 0..2);
        assert_eq!(visible_span(8, 4, 10), 8..10);
        assert_eq!(visible_span(12, 4, 10), 12..12);
        assert_eq!(visible_span(-10, 4, 10), 0..0);
        assert_eq!(visible_span(i64::MAX, 4, 10), i64::MAX..i64::MAX);
    }
}
