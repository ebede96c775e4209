use crate::foundation::core::Rect;
use crate::template::geometry::ImageFit;

/// Destination rectangle for an `image_w × image_h` bitmap placed into `slot`.
///
/// The result is centred on the slot. With [`ImageFit::Cover`] it may extend past the slot
/// and must be clipped; with [`ImageFit::Contain`] it lies inside the slot.
pub fn place_image(image_w: u32, image_h: u32, slot: Rect, fit: ImageFit) -> Rect {
    let iw = f64::from(image_w.max(1));
    let ih = f64::from(image_h.max(1));
    let sx = slot.width() / iw;
    let sy = slot.height() / ih;
    let s = match fit {
        ImageFit::Cover => sx.max(sy),
        ImageFit::Contain => sx.min(sy),
    };
    let w = iw * s;
    let h = ih * s;
    let c = slot.center();
    Rect::new(c.x - w / 2.0, c.y - h / 2.0, c.x + w / 2.0, c.y + h / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
