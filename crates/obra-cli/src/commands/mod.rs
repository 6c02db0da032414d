pub mod extract;
pub mod render;
