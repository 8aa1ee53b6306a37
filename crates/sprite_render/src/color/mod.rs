pub mod palette;
pub mod space;
