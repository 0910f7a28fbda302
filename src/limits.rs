use crate::error::DumpError;

/// Size caps applied to a dump.
///
/// Source caps are checked before the encoded bytes are hashed, so an
/// oversized texture is rejected without touching the dump directory. Output
/// caps are checked before the RGBA8 buffer is allocated. Every field
/// defaults to `None` (uncapped).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Largest texture or surface edge, in texels.
    pub max_dimension: Option<u32>,
    /// Largest span of encoded source bytes hashed for the dump key.
    pub max_source_bytes: Option<u64>,
    /// Largest decoded image, in pixels.
    pub max_pixels: Option<u64>,
    /// Largest decoded RGBA8 buffer, in bytes.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Gate a source texture of `width` x `height` backed by `encoded_len`
    /// bytes.
    pub(crate) fn check_source(
        &self,
        width: u32,
        height: u32,
        encoded_len: usize,
    ) -> Result<(), DumpError> {
        if let Some(max) = self.max_dimension {
            let edge = width.max(height);
            if edge > max {
                return Err(DumpError::LimitExceeded(format!(
                    "source texture {width}x{height} exceeds the {max} texel edge cap"
                )));
            }
        }
        if let Some(max) = self.max_source_bytes {
            if encoded_len as u64 > max {
                return Err(DumpError::LimitExceeded(format!(
                    "source texture spans {encoded_len} encoded bytes, cap is {max}"
                )));
            }
        }
        Ok(())
    }

    /// Gate a decoded image of `width` x `height` and return its RGBA8 size.
    pub(crate) fn check_output(&self, width: u32, height: u32) -> Result<usize, DumpError> {
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels {
            if pixels > max {
                return Err(DumpError::LimitExceeded(format!(
                    "dump of {width}x{height} is {pixels} pixels, cap is {max}"
                )));
            }
        }
        let bytes = rgba8_len(width, height)?;
        if let Some(max) = self.max_output_bytes {
            if bytes as u64 > max {
                return Err(DumpError::LimitExceeded(format!(
                    "dump of {width}x{height} needs {bytes} RGBA8 bytes, cap is {max}"
                )));
            }
        }
        Ok(bytes)
    }
}

/// Packed RGBA8 size of a `width` x `height` image.
pub(crate) fn rgba8_len(width: u32, height: u32) -> Result<usize, DumpError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(DumpError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_by_default() {
        let limits = Limits::default();
        assert!(limits.check_source(u32::MAX, u32::MAX, usize::MAX).is_ok());
        assert_eq!(limits.check_output(3, 5).unwrap(), 60);
    }

    #[test]
    fn edge_cap_covers_both_axes() {
        let limits = Limits {
            max_dimension: Some(1024),
            ..Default::default()
        };
        assert!(limits.check_source(1024, 1024, 0).is_ok());
        assert!(limits.check_source(8, 1025, 0).is_err());
        match limits.check_source(2048, 8, 0) {
            Err(DumpError::LimitExceeded(msg)) => assert!(msg.contains("2048x8")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn source_byte_cap() {
        let limits = Limits {
            max_source_bytes: Some(256),
            ..Default::default()
        };
        assert!(limits.check_source(8, 8, 256).is_ok());
        match limits.check_source(8, 8, 257) {
            Err(DumpError::LimitExceeded(msg)) => assert!(msg.contains("257")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn pixel_and_output_caps() {
        let by_pixels = Limits {
            max_pixels: Some(63),
            ..Default::default()
        };
        assert_eq!(by_pixels.check_output(7, 9).unwrap(), 252);
        match by_pixels.check_output(8, 8) {
            Err(DumpError::LimitExceeded(msg)) => assert!(msg.contains("64 pixels")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }

        let by_bytes = Limits {
            max_output_bytes: Some(255),
            ..Default::default()
        };
        assert!(matches!(
            by_bytes.check_output(8, 8),
            Err(DumpError::LimitExceeded(_))
        ));
    }
}
