//! Dump identity: content hashing, file naming and the output directory.

use std::fs;
use std::hash::Hasher as _;
use std::path::{Path, PathBuf};

use siphasher::sip::SipHasher13;

use crate::pixel::PixelFormat;

/// 64-bit hash of the encoded (pre-decode) texture bytes.
///
/// SipHash-1-3 with fixed zero keys, so hashes are stable across runs and
/// platforms and can name files.
pub fn content_hash(bytes: &[u8]) -> u64 {
    let mut hasher = SipHasher13::new();
    hasher.write(bytes);
    hasher.finish()
}

/// Identity of a dumped texture. Equal keys name the same file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DumpKey {
    pub width: u32,
    pub height: u32,
    pub hash: u64,
    pub format: PixelFormat,
}

impl DumpKey {
    /// `tex1_{width}x{height}_{hash:016X}_{tag}.png`
    pub fn file_name(&self) -> String {
        format!(
            "tex1_{}x{}_{:016X}_{}.png",
            self.width,
            self.height,
            self.hash,
            self.format.tag()
        )
    }

    pub fn path_in(&self, dump_dir: &Path) -> PathBuf {
        dump_dir.join(self.file_name())
    }
}

/// Where dumps go.
///
/// `program_id` namespaces output per running title; it is supplied by the
/// host rather than read from process state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpConfig {
    pub dump_root: PathBuf,
    pub program_id: u64,
}

impl DumpConfig {
    pub fn new(dump_root: impl Into<PathBuf>, program_id: u64) -> Self {
        Self {
            dump_root: dump_root.into(),
            program_id,
        }
    }

    /// `<dump_root>/textures/<program_id:016X>`
    pub fn dump_dir(&self) -> PathBuf {
        self.dump_root
            .join("textures")
            .join(format!("{:016X}", self.program_id))
    }

    /// Create the dump directory (and parents) if needed.
    pub fn resolve_dump_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self.dump_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
