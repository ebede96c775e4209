pub mod gate;
pub mod pdf;
pub mod png;
pub mod sink;
pub mod slug;
