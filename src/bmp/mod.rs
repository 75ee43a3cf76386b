//! BMP v3 24-bit codec (internal decode/encode, public header codec).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], or the
//! request builders.

pub(crate) mod decode;
pub(crate) mod encode;
pub mod header;
