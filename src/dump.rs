//! Deduplicated texture dumping.
//!
//! Each dump runs: resolve directory, hash the encoded bytes, build the
//! [`DumpKey`] path, skip if that file exists, otherwise decode and encode.
//!
//! The existence check and the write are not atomic. Two concurrent dumps of
//! the same key may both decode and both write; the content is identical and
//! the last rename wins.

use std::path::{Path, PathBuf};

use enough::Stop;

use crate::decode::{DecodedImage, LinearSurface, decode_linear, decode_region};
use crate::error::DumpError;
use crate::key::{DumpConfig, DumpKey, content_hash};
use crate::limits::Limits;
use crate::region::Region;
use crate::sink::{ImageSink, PngSink};
use crate::texel::{TexelLookup, TextureInfo};

/// Result of a dump that did not hit a decode error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DumpOutcome {
    /// A new file was written.
    Written(PathBuf),
    /// A dump with the same key already exists; nothing was decoded.
    Skipped(PathBuf),
    /// The dump directory could not be created.
    NoDestination,
    /// Decoding succeeded but the encoder failed; nothing was left at the path.
    EncodeFailed(PathBuf),
}

impl DumpOutcome {
    /// The dump file exists after this call.
    pub fn is_on_disk(&self) -> bool {
        matches!(self, Self::Written(_) | Self::Skipped(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Written(p) | Self::Skipped(p) | Self::EncodeFailed(p) => Some(p.as_path()),
            Self::NoDestination => None,
        }
    }
}

/// Dumps GPU textures and color buffers as deduplicated PNG files.
///
/// Environment failures (directory, encoder) are logged and reported through
/// [`DumpOutcome`]; only errors that prevent decoding are returned as `Err`.
#[derive(Clone, Debug)]
pub struct TextureDumper<S = PngSink> {
    config: DumpConfig,
    sink: S,
    limits: Option<Limits>,
}

impl TextureDumper<PngSink> {
    pub fn new(config: DumpConfig) -> Self {
        Self::with_sink(config, PngSink)
    }
}

impl<S: ImageSink> TextureDumper<S> {
    pub fn with_sink(config: DumpConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Dump a linear color buffer.
    ///
    /// The key covers the surface's `stride * height` encoded pixels from its
    /// start offset.
    pub fn dump_color(
        &self,
        surface: &LinearSurface<'_>,
        stop: &dyn Stop,
    ) -> Result<DumpOutcome, DumpError> {
        let encoded = surface.encoded_bytes()?;
        self.check_source(surface.width, surface.height, encoded.len())?;
        let key = DumpKey {
            width: surface.width,
            height: surface.height,
            hash: content_hash(encoded),
            format: surface.format,
        };
        self.dump_with(key, || decode_linear(surface, self.limits.as_ref(), stop))
    }

    /// Dump `region` of a structured texture.
    ///
    /// `region` must lie inside the texture; this is checked before the dump
    /// directory is consulted. The key uses the texture's dimensions and the
    /// hash of its `stride * height` encoded bytes, so every region of the
    /// same texture content shares one file.
    pub fn dump_texture(
        &self,
        source: &[u8],
        info: &TextureInfo,
        region: Region,
        lookup: &dyn TexelLookup,
        stop: &dyn Stop,
    ) -> Result<DumpOutcome, DumpError> {
        info.format.decodable_bpp()?;
        region.check_within(info.width, info.height)?;
        let len = info.byte_len()?;
        self.check_source(info.width, info.height, len)?;
        let encoded = source.get(..len).ok_or(DumpError::BufferTooSmall {
            needed: len,
            actual: source.len(),
        })?;
        let key = DumpKey {
            width: info.width,
            height: info.height,
            hash: content_hash(encoded),
            format: info.format,
        };
        self.dump_with(key, || {
            decode_region(source, info, region, lookup, self.limits.as_ref(), stop)
        })
    }

    fn check_source(&self, width: u32, height: u32, len: usize) -> Result<(), DumpError> {
        match &self.limits {
            Some(limits) => limits.check_source(width, height, len),
            None => Ok(()),
        }
    }

    fn dump_with(
        &self,
        key: DumpKey,
        decode: impl FnOnce() -> Result<DecodedImage, DumpError>,
    ) -> Result<DumpOutcome, DumpError> {
        let dir = match self.config.resolve_dump_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::error!(
                    "Unable to create {}: {e}",
                    self.config.dump_dir().display()
                );
                return Ok(DumpOutcome::NoDestination);
            }
        };

        let path = key.path_in(&dir);
        if path.exists() {
            log::debug!("Texture already dumped at {}", path.display());
            return Ok(DumpOutcome::Skipped(path));
        }

        log::info!("Dumping texture to {}", path.display());
        let image = decode()?;
        match self.sink.write_rgba8(&path, &image) {
            Ok(()) => Ok(DumpOutcome::Written(path)),
            Err(e) => {
                log::error!("Failed to write dumped texture {}: {e}", path.display());
                Ok(DumpOutcome::EncodeFailed(path))
            }
        }
    }
}
