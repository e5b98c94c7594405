pub mod cli;
pub mod export;
pub mod image;
pub mod resource;
pub mod settings;

pub use crate::image::{Image, ImageError, PixelFormat};
pub use crate::resource::{ICON_SIZES, IMAGES, find_image, icon_for_size};
