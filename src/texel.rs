//! Structured texel lookup: resolving `(x, y)` to a decoded color through a
//! texture's memory layout.

use rgb::Rgba;

use crate::color::decode_texel;
use crate::error::DumpError;
use crate::pixel::PixelFormat;

/// Source texture descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel row. May exceed `width * bpp` when rows are padded.
    pub stride: u32,
    pub format: PixelFormat,
}

impl TextureInfo {
    /// Descriptor with tightly packed rows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            stride: width.saturating_mul(format.bits_per_pixel()) / 8,
            format,
        }
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    /// Bytes covered by the texture: `stride * height`.
    pub fn byte_len(&self) -> Result<usize, DumpError> {
        (self.stride as usize)
            .checked_mul(self.height as usize)
            .ok_or(DumpError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Resolves and decodes one texel of a structured texture.
///
/// Implementors own the addressing scheme (tiling, swizzling, padding);
/// callers only supply coordinates.
pub trait TexelLookup {
    fn lookup(
        &self,
        source: &[u8],
        x: u32,
        y: u32,
        info: &TextureInfo,
    ) -> Result<Rgba<u8>, DumpError>;
}

/// Decode the texel at byte `offset`; `None` means the address overflowed.
fn decode_at(
    source: &[u8],
    offset: Option<usize>,
    format: PixelFormat,
) -> Result<Rgba<u8>, DumpError> {
    let too_small = |needed: usize| DumpError::BufferTooSmall {
        needed,
        actual: source.len(),
    };
    let offset = offset.ok_or_else(|| too_small(usize::MAX))?;
    let bytes = source.get(offset..).ok_or_else(|| {
        too_small(offset.saturating_add(format.bytes_per_pixel().unwrap_or(1)))
    })?;
    decode_texel(format, bytes).map_err(|e| match e {
        DumpError::BufferTooSmall { needed, .. } => too_small(offset.saturating_add(needed)),
        other => other,
    })
}

/// Row-major layout: texel `(x, y)` at `y * stride + x * bpp`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearLayout;

impl TexelLookup for LinearLayout {
    fn lookup(
        &self,
        source: &[u8],
        x: u32,
        y: u32,
        info: &TextureInfo,
    ) -> Result<Rgba<u8>, DumpError> {
        let bpp = info.format.decodable_bpp()?;
        let offset = (y as usize)
            .checked_mul(info.stride as usize)
            .and_then(|row| row.checked_add((x as usize).checked_mul(bpp)?));
        decode_at(source, offset, info.format)
    }
}

/// The GPU's native texture layout.
///
/// Texels are grouped into 8x8 tiles stored row-major across a tile row.
/// Inside a tile, texels follow a Morton (Z-order) curve.
#[derive(Clone, Copy, Debug, Default)]
pub struct TiledLayout;

impl TiledLayout {
    const TILE: u32 = 8;

    /// Z-order index of `(x, y)` inside an 8x8 tile.
    pub fn morton_interleave(x: u32, y: u32) -> u32 {
        const XLUT: [u32; 8] = [0x00, 0x01, 0x04, 0x05, 0x10, 0x11, 0x14, 0x15];
        const YLUT: [u32; 8] = [0x00, 0x02, 0x08, 0x0a, 0x20, 0x22, 0x28, 0x2a];
        XLUT[(x % 8) as usize] + YLUT[(y % 8) as usize]
    }
}

impl TexelLookup for TiledLayout {
    fn lookup(
        &self,
        source: &[u8],
        x: u32,
        y: u32,
        info: &TextureInfo,
    ) -> Result<Rgba<u8>, DumpError> {
        let bpp = info.format.decodable_bpp()?;
        let coarse_y = (y & !(Self::TILE - 1)) as usize;
        let coarse_x = (x & !(Self::TILE - 1)) as usize;
        let offset = coarse_y
            .checked_mul(info.stride as usize)
            .and_then(|line| {
                let tile = coarse_x.checked_mul(Self::TILE as usize * bpp)?;
                line.checked_add(tile)
            })
            .and_then(|tile| {
                tile.checked_add(Self::morton_interleave(x, y) as usize * bpp)
            });
        decode_at(source, offset, info.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stride_is_packed() {
        assert_eq!(TextureInfo::new(16, 4, PixelFormat::Rgb8).stride, 48);
        assert_eq!(TextureInfo::new(16, 4, PixelFormat::I4).stride, 8);
        assert_eq!(
            TextureInfo::new(16, 4, PixelFormat::Rgba8).byte_len().unwrap(),
            256
        );
    }

    #[test]
    fn morton_covers_tile() {
        let mut seen = [false; 64];
        for y in 0..8 {
            for x in 0..8 {
                let i = TiledLayout::morton_interleave(x, y) as usize;
                assert!(!seen[i], "duplicate index {i}");
                seen[i] = true;
            }
        }
        assert_eq!(TiledLayout::morton_interleave(1, 0), 1);
        assert_eq!(TiledLayout::morton_interleave(0, 1), 2);
        assert_eq!(TiledLayout::morton_interleave(7, 7), 63);
    }

    #[test]
    fn linear_lookup_respects_stride() {
        // 2x2 RGB8 with one byte of padding per row
        let info = TextureInfo::new(2, 2, PixelFormat::Rgb8).with_stride(7);
        let source = [
            0, 0, 1, 0, 0, 2, 0xAA, //
            0, 0, 3, 0, 0, 4, 0xAA,
        ];
        let c = LinearLayout.lookup(&source, 1, 1, &info).unwrap();
        assert_eq!(c, Rgba::new(4, 0, 0, 255));
    }

    #[test]
    fn tiled_lookup_second_tile() {
        // 16x8 RGBA4: two tiles side by side, 128 bytes each
        let info = TextureInfo::new(16, 8, PixelFormat::Rgba4);
        let mut source = vec![0u8; 256];
        // (9, 1) -> tile 1, morton(1, 1) = 3
        let offset = 128 + 3 * 2;
        source[offset..offset + 2].copy_from_slice(&0xF00Fu16.to_le_bytes());
        let c = TiledLayout.lookup(&source, 9, 1, &info).unwrap();
        assert_eq!(c, Rgba::new(255, 0, 0, 255));
        let other = TiledLayout.lookup(&source, 1, 1, &info).unwrap();
        assert_eq!(other, Rgba::new(0, 0, 0, 0));
    }

    #[test]
    fn tiled_lookup_second_tile_row() {
        // 8x16 RGB565: tile row 1 starts at 8 * stride
        let info = TextureInfo::new(8, 16, PixelFormat::Rgb565);
        let mut source = vec![0u8; 256];
        let offset = 8 * info.stride as usize;
        source[offset..offset + 2].copy_from_slice(&0xFFFFu16.to_le_bytes());
        let c = TiledLayout.lookup(&source, 0, 8, &info).unwrap();
        assert_eq!(c, Rgba::new(255, 255, 255, 255));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let info = TextureInfo::new(8, 8, PixelFormat::Rgba8);
        let source = vec![0u8; 16];
        assert!(matches!(
            TiledLayout.lookup(&source, 7, 7, &info),
            Err(DumpError::BufferTooSmall { actual: 16, .. })
        ));
        assert!(matches!(
            LinearLayout.lookup(&source, 0, 1, &info),
            Err(DumpError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn huge_stride_is_an_error() {
        let info = TextureInfo::new(8, u32::MAX, PixelFormat::Rgba8).with_stride(u32::MAX);
        let source = vec![0u8; 64];
        let y = u32::MAX - 1;
        for lookup in [&LinearLayout as &dyn TexelLookup, &TiledLayout] {
            assert!(matches!(
                lookup.lookup(&source, 7, y, &info),
                Err(DumpError::BufferTooSmall { actual: 64, .. })
            ));
        }
    }
}
