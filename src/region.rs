use crate::error::DumpError;

/// A rectangle of texel coordinates to export.
///
/// Edges follow the GPU convention: `bottom` is the first row and `top` is
/// one past the last, so `top > bottom`. Likewise `right > left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Region {
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> Result<Self, DumpError> {
        let region = Self {
            left,
            right,
            top,
            bottom,
        };
        region.validate()?;
        Ok(region)
    }

    /// The whole `width` x `height` surface.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            right: width,
            top: height,
            bottom: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.top.saturating_sub(self.bottom)
    }

    /// Whether the region lies inside a `width` x `height` surface.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.top <= height
    }

    pub(crate) fn validate(&self) -> Result<(), DumpError> {
        if self.right > self.left && self.top > self.bottom {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    /// [`validate`](Self::validate) plus [`fits_within`](Self::fits_within).
    pub(crate) fn check_within(&self, width: u32, height: u32) -> Result<(), DumpError> {
        self.validate()?;
        if self.fits_within(width, height) {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    fn invalid(&self) -> DumpError {
        DumpError::InvalidRegion {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_region_dimensions() {
        let r = Region::full(64, 32);
        assert_eq!((r.width(), r.height()), (64, 32));
        assert!(r.fits_within(64, 32));
        assert!(!r.fits_within(63, 32));
    }

    #[test]
    fn empty_or_inverted_rejected() {
        assert!(Region::new(4, 4, 8, 0).is_err());
        assert!(Region::new(0, 4, 2, 3).is_err());
        let r = Region::new(2, 6, 5, 1).unwrap();
        assert_eq!((r.width(), r.height()), (4, 4));
    }

    #[test]
    fn check_within_bounds() {
        let r = Region::new(0, 100, 100, 0).unwrap();
        assert!(r.check_within(100, 100).is_ok());
        assert!(matches!(
            r.check_within(8, 8),
            Err(DumpError::InvalidRegion { right: 100, .. })
        ));
    }
}
