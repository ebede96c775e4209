use image::ImageEncoder;

use crate::export::sink::{ExportSink, ExportedArtifact, PNG_MEDIA_TYPE};
use crate::export::slug::png_file_name;
use crate::foundation::error::{PhotoverseError, PhotoverseResult};
use crate::render::Surface;

/// Encode a composed surface as straight-alpha RGBA PNG.
pub fn encode_png(surface: &Surface) -> PhotoverseResult<Vec<u8>> {
    let expected = surface.width as usize * surface.height as usize * 4;
    if surface.data.len() != expected {
        return Err(PhotoverseError::export(format!(
            "surface holds {} bytes, expected {expected}",
            surface.data.len()
        )));
    }
    let rgba = surface.to_straight_rgba();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            surface.width,
            surface.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| PhotoverseError::export(format!("png encode: {e}")))?;
    Ok(out)
}

/// Encode `surface` and hand it to `sink` under the title-derived file name.
#[tracing::instrument(skip(surface, sink), fields(w = surface.width, h = surface.height))]
pub fn export_png(
    surface: &Surface,
    title: &str,
    sink: &mut dyn ExportSink,
) -> PhotoverseResult<ExportedArtifact> {
    let bytes = encode_png(surface)?;
    let artifact = sink.deliver(&png_file_name(title), PNG_MEDIA_TYPE, &bytes)?;
    tracing::info!(file = %artifact.file_name, bytes = artifact.byte_len, "png exported");
    Ok(artifact)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
