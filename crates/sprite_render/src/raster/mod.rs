pub mod canvas;
pub mod font;
pub mod sprite;
