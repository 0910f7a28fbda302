//! Image persistence.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::decode::DecodedImage;
use crate::error::DumpError;

/// Writes a decoded image to `path`.
pub trait ImageSink {
    fn write_rgba8(&self, path: &Path, image: &DecodedImage) -> Result<(), DumpError>;
}

/// Lossless PNG output, RGBA 8 bits per channel.
///
/// The image is encoded to a uniquely named sibling `.tmp` file and renamed
/// into place, so `path` only ever holds a complete PNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngSink;

impl PngSink {
    fn encode(path: &Path, image: &DecodedImage) -> Result<(), DumpError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(writer, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut png_writer = encoder
            .write_header()
            .map_err(|e| DumpError::Encode(e.to_string()))?;
        png_writer
            .write_image_data(image.pixels())
            .map_err(|e| DumpError::Encode(e.to_string()))?;
        png_writer
            .finish()
            .map_err(|e| DumpError::Encode(e.to_string()))?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    ));
    path.with_file_name(name)
}

impl ImageSink for PngSink {
    fn write_rgba8(&self, path: &Path, image: &DecodedImage) -> Result<(), DumpError> {
        let tmp = temp_path(path);
        let written = Self::encode(&tmp, image).and_then(|()| Ok(fs::rename(&tmp, path)?));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written
    }
}
