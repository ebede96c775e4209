use std::path::PathBuf;
use std::sync::Arc;

pub mod decode;

/// Where the photo for a render comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes already held in memory (PNG, JPEG, WebP, ...).
    Bytes(Arc<[u8]>),
    /// Encoded image file on disk.
    Path(PathBuf),
}

impl ImageSource {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Arc::from(bytes.into()))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(b) => format!("<{} in-memory bytes>", b.len()),
            Self::Path(p) => p.display().to_string(),
        }
    }
}

/// Decoded bitmap ready to paint.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Flatten onto an opaque background and drop alpha, for containers without alpha
    /// support.
    pub fn to_rgb8_over(&self, background: [u8; 3]) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width as usize) * (self.height as usize) * 3);
        for px in self.rgba8_premul.chunks_exact(4) {
            let inv = 255 - u16::from(px[3]);
            for c in 0..3 {
                let v = u16::from(px[c]) + (u16::from(background[c]) * inv + 127) / 255;
                out.push(v.min(255) as u8);
            }
        }
        out
    }
}
