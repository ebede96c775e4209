use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use crate::assets::{ImageSource, PreparedImage};
use crate::foundation::error::{PhotoverseError, PhotoverseResult};

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PhotoverseResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PhotoverseError::image_decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PhotoverseError::image_decode("image has no pixels"));
    }
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(PhotoverseError::image_decode(format!(
            "image {width}x{height} exceeds the raster limit"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn read_source(source: &ImageSource) -> PhotoverseResult<Arc<[u8]>> {
    match source {
        ImageSource::Bytes(b) => Ok(Arc::clone(b)),
        ImageSource::Path(p) => std::fs::read(p).map(Arc::from).map_err(|e| {
            PhotoverseError::image_decode(format!("failed to read image '{}': {e}", p.display()))
        }),
    }
}

/// Load and decode `source` on a helper thread, giving up after `timeout`.
///
/// A timed-out decode keeps running in the background; its result is discarded.
pub fn load_image(source: &ImageSource, timeout: Duration) -> PhotoverseResult<PreparedImage> {
    let source = source.clone();
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("photoverse-decode".to_string())
        .spawn(move || {
            let out = read_source(&source).and_then(|bytes| decode_image(&bytes));
            let _ = tx.send(out);
        })
        .map_err(|e| PhotoverseError::image_decode(format!("spawn decode thread: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(out) => out,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(?timeout, "image decode timed out");
            Err(PhotoverseError::image_decode(format!(
                "image decode timed out after {} ms",
                timeout.as_millis()
            )))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(PhotoverseError::image_decode("decode thread exited without a result"))
        }
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
