//! Word wrapping and shrink-to-fit, shared by the raster and document exports.

pub mod fit;
pub mod wrap;
