//! Per-texel decoding from native GPU encodings to RGBA8.

use rgb::Rgba;

use crate::error::DumpError;
use crate::pixel::PixelFormat;

/// Multipliers for widening an N-bit channel to 8 bits by bit replication.
const MUL_TABLE: [u32; 9] = [
    0,    // 0 bits
    0xff, // 1 bit:  0b11111111
    0x55, // 2 bits: 0b01010101
    0x49, // 3 bits: 0b01001001
    0x11, // 4 bits: 0b00010001
    0x21, // 5 bits: 0b00100001
    0x41, // 6 bits: 0b01000001
    0x81, // 7 bits: 0b10000001
    0x01, // 8 bits: 0b00000001
];

const SHIFT_TABLE: [u32; 9] = [0, 0, 0, 1, 0, 2, 4, 6, 0];

/// Widen the low `bits` bits of `v` to the full 0..=255 range.
///
/// The maximum N-bit value always maps to 255 and zero to 0.
#[inline]
pub(crate) fn expand_bits(v: u16, bits: u32) -> u8 {
    let bits = bits.clamp(0, 8) as usize;
    let v = u32::from(v) & ((1 << bits) - 1);
    ((v * MUL_TABLE[bits]) >> SHIFT_TABLE[bits]) as u8
}

#[inline]
fn word_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Decode one texel of `format` from the start of `bytes`.
///
/// Every bit pattern is a valid input. Returns `BufferTooSmall` when `bytes`
/// is shorter than one texel and `UnsupportedFormat` for formats the decoder
/// does not normalize.
pub fn decode_texel(format: PixelFormat, bytes: &[u8]) -> Result<Rgba<u8>, DumpError> {
    let bpp = format.decodable_bpp()?;
    if bytes.len() < bpp {
        return Err(DumpError::BufferTooSmall {
            needed: bpp,
            actual: bytes.len(),
        });
    }

    let texel = match format {
        PixelFormat::Rgba8 => Rgba::new(bytes[3], bytes[2], bytes[1], bytes[0]),
        PixelFormat::Rgb8 => Rgba::new(bytes[2], bytes[1], bytes[0], 255),
        PixelFormat::Rgb5a1 => {
            let p = word_le(bytes);
            Rgba::new(
                expand_bits(p >> 11, 5),
                expand_bits(p >> 6, 5),
                expand_bits(p >> 1, 5),
                expand_bits(p, 1),
            )
        }
        PixelFormat::Rgb565 => {
            let p = word_le(bytes);
            Rgba::new(
                expand_bits(p >> 11, 5),
                expand_bits(p >> 5, 6),
                expand_bits(p, 5),
                255,
            )
        }
        PixelFormat::Rgba4 => {
            let p = word_le(bytes);
            Rgba::new(
                expand_bits(p >> 12, 4),
                expand_bits(p >> 8, 4),
                expand_bits(p >> 4, 4),
                expand_bits(p, 4),
            )
        }
        PixelFormat::Ia8
        | PixelFormat::Rg8
        | PixelFormat::I8
        | PixelFormat::A8
        | PixelFormat::Ia4
        | PixelFormat::I4
        | PixelFormat::A4
        | PixelFormat::Etc1
        | PixelFormat::Etc1a4
        | PixelFormat::D16
        | PixelFormat::D24
        | PixelFormat::D24s8 => return Err(DumpError::UnsupportedFormat { format }),
    };
    Ok(texel)
}
