//! Surface and region decoding into a packed RGBA8 image.

use enough::Stop;
use rgb::AsPixels as _;
use rgb::Rgba;

use crate::color::decode_texel;
use crate::error::DumpError;
use crate::limits::{Limits, rgba8_len};
use crate::pixel::PixelFormat;
use crate::region::Region;
use crate::texel::{TexelLookup, TextureInfo};

/// Decoded image: row-major RGBA8, no row padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    /// Wrap an existing packed RGBA8 buffer of exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DumpError> {
        let expected = rgba8_len(width, height)?;
        if pixels.len() != expected {
            return Err(DumpError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    pub fn as_pixels(&self) -> &[Rgba<u8>] {
        self.pixels.as_slice().as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Rgba<u8>> {
        imgref::ImgRef::new(
            self.as_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }

    fn with_capacity(
        width: u32,
        height: u32,
        limits: Option<&Limits>,
    ) -> Result<Self, DumpError> {
        let out_bytes = match limits {
            Some(limits) => limits.check_output(width, height)?,
            None => rgba8_len(width, height)?,
        };
        Ok(Self {
            pixels: Vec::with_capacity(out_bytes),
            width,
            height,
        })
    }

    #[inline]
    fn push(&mut self, c: Rgba<u8>) {
        self.pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }
}

/// A linearly laid out color buffer, such as a framebuffer in emulated memory.
///
/// Texel `(x, y)` lives at `start_offset + (x + y' * stride) * bpp`, where
/// `y'` is `height - 1 - y` when the surface is flipped and `y` otherwise.
#[derive(Clone, Copy, Debug)]
pub struct LinearSurface<'a> {
    source: &'a [u8],
    start_offset: usize,
    pub format: PixelFormat,
    /// Row pitch in pixels.
    pub stride: u32,
    pub width: u32,
    pub height: u32,
    pub flip: bool,
}

impl<'a> LinearSurface<'a> {
    /// Tightly packed, unflipped surface starting at the beginning of `source`.
    pub fn new(source: &'a [u8], format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            source,
            start_offset: 0,
            format,
            stride: width,
            width,
            height,
            flip: false,
        }
    }

    pub fn with_start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    /// Set the row pitch, in pixels.
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    /// Read rows bottom-up.
    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// The encoded bytes backing this surface: `stride * height` pixels
    /// from the start offset.
    ///
    /// Checks format, dimensions and buffer length, so a surface whose
    /// bytes resolve is safe to decode.
    pub fn encoded_bytes(&self) -> Result<&'a [u8], DumpError> {
        let bpp = self.format.decodable_bpp()?;
        Region::full(self.width, self.height).validate()?;
        if self.stride < self.width {
            return Err(DumpError::InvalidStride {
                stride: self.stride,
                width: self.width,
            });
        }
        let len = (self.stride as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(bpp))
            .ok_or(DumpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })?;
        let end = self
            .start_offset
            .checked_add(len)
            .ok_or(DumpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })?;
        self.source
            .get(self.start_offset..end)
            .ok_or(DumpError::BufferTooSmall {
                needed: end,
                actual: self.source.len(),
            })
    }
}

/// Decode a whole linear surface to RGBA8, resolving the flip.
pub fn decode_linear(
    surface: &LinearSurface<'_>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedImage, DumpError> {
    let encoded = surface.encoded_bytes()?;
    let bpp = surface.format.decodable_bpp()?;
    let (w, h) = (surface.width as usize, surface.height as usize);
    let row_pitch = surface.stride as usize * bpp;

    let mut out = DecodedImage::with_capacity(surface.width, surface.height, limits)?;
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src_y = if surface.flip { h - 1 - y } else { y };
        let row = &encoded[src_y * row_pitch..][..w * bpp];
        for texel in row.chunks_exact(bpp) {
            out.push(decode_texel(surface.format, texel)?);
        }
    }
    Ok(out)
}

/// Decode `region` of a structured texture to RGBA8.
///
/// The output is `region.width() x region.height()`; output row 0 is source
/// row `region.bottom` and output column 0 is source column `region.left`.
pub fn decode_region(
    source: &[u8],
    info: &TextureInfo,
    region: Region,
    lookup: &dyn TexelLookup,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedImage, DumpError> {
    info.format.decodable_bpp()?;
    region.check_within(info.width, info.height)?;

    let mut out = DecodedImage::with_capacity(region.width(), region.height(), limits)?;
    for (row, y) in (region.bottom..region.top).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        for x in region.left..region.right {
            out.push(lookup.lookup(source, x, y, info)?);
        }
    }
    Ok(out)
}
