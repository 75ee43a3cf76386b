//! # zenbmp
//!
//! Decoder and encoder for uncompressed 24-bit Windows BMP files with the
//! 40-byte v3 DIB header, plus an owned pixel buffer with pixel- and
//! region-level operations.
//!
//! ## Pixel buffer
//!
//! [`PixelBuffer`] stores pixels row-major, top row first, each pixel as
//! three bytes in B,G,R order, with no row padding. Out-of-range reads
//! return black; out-of-range writes return `false`.
//!
//! Compositing ([`PixelBuffer::overlay`], [`PixelBuffer::mask`],
//! [`PixelBuffer::add`]) places a source buffer at a signed offset and
//! clips against the destination.
//!
//! ## Non-Goals
//!
//! - Compressed BMP (RLE, bitfields), 1/4/8-bit and paletted images
//! - Header versions other than BITMAPINFOHEADER (v3)
//! - Color management or DPI conversion; resolution is passed through in
//!   pixels per meter
//!
//! ## Logging
//!
//! Header summaries and file open/close events are emitted at `debug`
//! level and per-row progress at `trace` level through the [`log`] facade.
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{Channel, PixelBuffer, RgbPixel};
//!
//! let mut img = zenbmp::load("in.bmp")?;
//! img.invert(Channel::Green);
//!
//! let mut stamp = PixelBuffer::new(8, 8)?;
//! stamp.fill_pixel(RgbPixel::new(255, 0, 255));
//! let clipped = img.overlay(&stamp, -4, -4);
//! assert!(clipped);
//!
//! zenbmp::save("out.bmp", &img)?;
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
mod composite;
mod error;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

// Re-exports
pub use bmp::header::{BmpFileLayout, padded_row_bytes, read_field, write_field};
pub use buffer::{DEFAULT_RESOLUTION_PPM, PixelBuffer};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use error::BmpError;
pub use limits::Limits;
pub use pixel::{Channel, RgbPixel, add_pixel};

/// Decode a BMP from a seekable source with default settings.
pub fn decode_bmp<R: Read + Seek>(reader: R) -> Result<PixelBuffer, BmpError> {
    DecodeRequest::new().decode(reader)
}

/// Decode a BMP held in memory with default settings.
pub fn decode_bmp_bytes(data: &[u8]) -> Result<PixelBuffer, BmpError> {
    DecodeRequest::new().decode_bytes(data)
}

/// Encode `buffer` as a BMP to `writer` with default settings.
pub fn encode_bmp<W: Write>(buffer: &PixelBuffer, writer: W) -> Result<(), BmpError> {
    EncodeRequest::new().encode(buffer, writer)
}

/// Encode `buffer` as a BMP into a new byte vector.
pub fn encode_bmp_to_vec(buffer: &PixelBuffer) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new().encode_to_vec(buffer)
}

/// Read a BMP file from disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, BmpError> {
    let path = path.as_ref();
    log::debug!("opening {}", path.display());
    let file = File::open(path)?;
    let buffer = decode_bmp(BufReader::new(file))?;
    log::debug!(
        "loaded {}: {}x{}",
        path.display(),
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}

/// Write `buffer` to disk as a BMP file, replacing any existing file.
pub fn save<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<(), BmpError> {
    let path = path.as_ref();
    log::debug!("opening {} for saving", path.display());
    let file = File::create(path)?;
    encode_bmp(buffer, BufWriter::new(file))?;
    log::debug!("closing {}", path.display());
    Ok(())
}
