use crate::error::DumpError;

/// GPU surface pixel format.
///
/// Discriminants are the hardware format tags; they appear verbatim in dump
/// file names.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// 32-bit RGBA, 8 bits per channel.
    Rgba8 = 0,
    /// 24-bit RGB, 8 bits per channel.
    Rgb8 = 1,
    /// 16-bit RGB 5-5-5 with 1-bit alpha.
    Rgb5a1 = 2,
    /// 16-bit RGB 5-6-5, opaque.
    Rgb565 = 3,
    /// 16-bit RGBA 4-4-4-4.
    Rgba4 = 4,
    /// 8-bit intensity, 8-bit alpha.
    Ia8 = 5,
    /// 8-bit red, 8-bit green.
    Rg8 = 6,
    /// 8-bit intensity.
    I8 = 7,
    /// 8-bit alpha.
    A8 = 8,
    /// 4-bit intensity, 4-bit alpha.
    Ia4 = 9,
    /// 4-bit intensity.
    I4 = 10,
    /// 4-bit alpha.
    A4 = 11,
    /// ETC1 block compression.
    Etc1 = 12,
    /// ETC1 with a separate 4-bit alpha block.
    Etc1a4 = 13,
    /// 16-bit depth.
    D16 = 14,
    /// 24-bit depth.
    D24 = 16,
    /// 24-bit depth, 8-bit stencil.
    D24s8 = 17,
}

impl PixelFormat {
    /// Resolve a hardware format tag.
    pub fn from_tag(tag: u32) -> Result<Self, DumpError> {
        Ok(match tag {
            0 => Self::Rgba8,
            1 => Self::Rgb8,
            2 => Self::Rgb5a1,
            3 => Self::Rgb565,
            4 => Self::Rgba4,
            5 => Self::Ia8,
            6 => Self::Rg8,
            7 => Self::I8,
            8 => Self::A8,
            9 => Self::Ia4,
            10 => Self::I4,
            11 => Self::A4,
            12 => Self::Etc1,
            13 => Self::Etc1a4,
            14 => Self::D16,
            16 => Self::D24,
            17 => Self::D24s8,
            other => return Err(DumpError::UnknownFormatTag(other)),
        })
    }

    /// The hardware format tag.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Bits per pixel as stored in GPU memory.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Rgba8 | Self::D24s8 => 32,
            Self::Rgb8 | Self::D24 => 24,
            Self::Rgb5a1 | Self::Rgb565 | Self::Rgba4 | Self::Ia8 | Self::Rg8 | Self::D16 => 16,
            Self::I8 | Self::A8 | Self::Ia4 | Self::Etc1a4 => 8,
            Self::I4 | Self::A4 | Self::Etc1 => 4,
        }
    }

    /// Whole bytes per pixel, or `None` for sub-byte formats.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        let bits = self.bits_per_pixel();
        (bits % 8 == 0).then_some(bits as usize / 8)
    }

    /// Whether the texel decoder can normalize this format to RGBA8.
    pub fn is_decodable(self) -> bool {
        matches!(
            self,
            Self::Rgba8 | Self::Rgb8 | Self::Rgb5a1 | Self::Rgb565 | Self::Rgba4
        )
    }

    /// Bytes per pixel for a decodable format, else `UnsupportedFormat`.
    pub(crate) fn decodable_bpp(self) -> Result<usize, DumpError> {
        match self.bytes_per_pixel() {
            Some(bpp) if self.is_decodable() => Ok(bpp),
            _ => Err(DumpError::UnsupportedFormat { format: self }),
        }
    }
}

impl TryFrom<u32> for PixelFormat {
    type Error = DumpError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}
