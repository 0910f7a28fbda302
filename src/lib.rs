//! # texdump
//!
//! Decode GPU-native pixel buffers to RGBA8 and dump them as lossless PNG
//! files, deduplicated by a hash of the encoded source bytes.
//!
//! ## Supported Formats
//!
//! - **RGBA8**: 32-bit, direct copy
//! - **RGB8**: 24-bit, opaque
//! - **RGB5A1**: 16-bit, 5 bits per color channel and 1-bit alpha
//! - **RGB565**: 16-bit, opaque
//! - **RGBA4**: 16-bit, 4 bits per channel
//!
//! Narrow channels are widened by bit replication, so the maximum input value
//! always maps to 255. Every other [`PixelFormat`] is recognized by tag but
//! rejected with [`DumpError::UnsupportedFormat`] before anything is written.
//!
//! ## Deduplication
//!
//! Output lands at
//! `<dump_root>/textures/<program_id:016X>/tex1_{w}x{h}_{hash:016X}_{tag}.png`.
//! If that file already exists the dump is skipped without decoding.
//!
//! ## Non-Goals
//!
//! - Color-space conversion beyond bit-depth normalization
//! - Lossy output
//! - Texture cache policy (when to dump is the host's decision)
//!
//! ## Usage
//!
//! ```no_run
//! use texdump::{DumpConfig, LinearSurface, PixelFormat, TextureDumper};
//! use enough::Unstoppable;
//!
//! let framebuffer: &[u8] = &[]; // RGB565 color buffer from emulated memory
//!
//! let dumper = TextureDumper::new(DumpConfig::new("dump", 0x0004_0000_0012_3400));
//! let surface = LinearSurface::new(framebuffer, PixelFormat::Rgb565, 400, 240)
//!     .flipped(true);
//! let outcome = dumper.dump_color(&surface, &Unstoppable)?;
//! println!("{outcome:?}");
//! # Ok::<(), texdump::DumpError>(())
//! ```

#![forbid(unsafe_code)]

mod color;
mod decode;
mod dump;
mod error;
mod key;
mod limits;
mod pixel;
mod region;
mod sink;
mod texel;

// Re-exports
pub use color::decode_texel;
pub use decode::{DecodedImage, LinearSurface, decode_linear, decode_region};
pub use dump::{DumpOutcome, TextureDumper};
pub use enough::{Stop, Unstoppable};
pub use error::DumpError;
pub use key::{DumpConfig, DumpKey, content_hash};
pub use limits::Limits;
pub use pixel::PixelFormat;
pub use region::Region;
pub use rgb::Rgba;
pub use sink::{ImageSink, PngSink};
pub use texel::{LinearLayout, TexelLookup, TextureInfo, TiledLayout};
