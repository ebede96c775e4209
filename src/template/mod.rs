pub mod geometry;
pub mod kind;
