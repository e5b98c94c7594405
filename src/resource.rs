use crate::image::{Image, PixelFormat};

pub const ICON_SIZES: [usize; 6] = [16, 24, 32, 48, 64, 128];

macro_rules! icon_resource {
    ($module:ident, $size:literal, $file:literal) => {
        #[doc = concat!("`", stringify!($module), "` bitmap resource, ", stringify!($size), "x", stringify!($size), " nrgba.")]
        pub mod $module {
            use super::{Image, PixelFormat};

            pub const NAME: &str = stringify!($module);
            pub const WIDTH: usize = $size;
            pub const HEIGHT: usize = $size;
            pub const FORMAT: PixelFormat = PixelFormat::Nrgba;

            pub static DATA: [u8; $size * $size * 4] = *include_bytes!(concat!("../assets/", $file));
            pub static IMAGE: Image<'static> = Image::new(NAME, FORMAT, WIDTH, HEIGHT, &DATA);
        }
    };
}

icon_resource!(app_icon_16, 16, "app_icon_16.nrgba");
icon_resource!(app_icon_24, 24, "app_icon_24.nrgba");
icon_resource!(app_icon_32, 32, "app_icon_32.nrgba");
icon_resource!(app_icon_48, 48, "app_icon_48.nrgba");
icon_resource!(app_icon_64, 64, "app_icon_64.nrgba");
icon_resource!(app_icon_128, 128, "app_icon_128.nrgba");

/// All embedded icons, smallest first.
pub static IMAGES: [&Image<'static>; 6] = [
    &app_icon_16::IMAGE,
    &app_icon_24::IMAGE,
    &app_icon_32::IMAGE,
    &app_icon_48::IMAGE,
    &app_icon_64::IMAGE,
    &app_icon_128::IMAGE,
];

pub fn find_image(name: &str) -> Option<&'static Image<'static>> {
    IMAGES.iter().copied().find(|image| image.name() == name)
}

/// Smallest icon at least `size` pixels wide, falling back to the largest.
pub fn icon_for_size(size: usize) -> &'static Image<'static> {
    IMAGES
        .iter()
        .copied()
        .find(|image| image.width() >= size)
        .unwrap_or(IMAGES[IMAGES.len() - 1])
}
