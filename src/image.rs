use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

// 4 bytes per pixel, row-major, R G B A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PixelFormat {
    Nrgba,
    /// Colour channels premultiplied by alpha.
    Prgba,
}

impl PixelFormat {
    pub const fn tag(self) -> &'static str {
        match self {
            PixelFormat::Nrgba => "nrgba",
            PixelFormat::Prgba => "prgba",
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Nrgba | PixelFormat::Prgba => 4,
        }
    }
}

impl TryFrom<String> for PixelFormat {
    type Error = ImageError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PixelFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nrgba" => Ok(PixelFormat::Nrgba),
            "prgba" => Ok(PixelFormat::Prgba),
            _ => Err(ImageError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    DimensionOverflow {
        width: usize,
        height: usize,
    },
    UnknownFormat(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::LengthMismatch {
                name,
                expected,
                actual,
            } => write!(f, "image '{name}': expected {expected} bytes, got {actual}"),
            ImageError::DimensionOverflow { width, height } => {
                write!(f, "image dimensions {width}x{height} overflow the address space")
            }
            ImageError::UnknownFormat(tag) => write!(f, "unknown pixel format: {tag}"),
        }
    }
}

impl std::error::Error for ImageError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image<'a> {
    name: &'a str,
    format: PixelFormat,
    width: usize,
    height: usize,
    bytes: &'a [u8],
}

impl<'a> Image<'a> {
    /// Panics if `bytes` does not hold exactly `width * height` pixels, which
    /// turns into a compile error when evaluated in a `static` or `const`:
    ///
    /// ```compile_fail
    /// use respack::{Image, PixelFormat};
    ///
    /// static SHORT: Image<'static> = Image::new("short", PixelFormat::Nrgba, 2, 2, &[0; 12]);
    /// ```
    pub const fn new(
        name: &'a str, format: PixelFormat, width: usize, height: usize, bytes: &'a [u8],
    ) -> Self {
        let expected = match byte_len(format, width, height) {
            Some(len) => len,
            None => panic!("image dimensions overflow"),
        };
        assert!(bytes.len() == expected, "image byte length does not match its dimensions");
        Self {
            name,
            format,
            width,
            height,
            bytes,
        }
    }

    pub fn try_new(
        name: &'a str, format: PixelFormat, width: usize, height: usize, bytes: &'a [u8],
    ) -> Result<Self, ImageError> {
        let expected =
            byte_len(format, width, height).ok_or(ImageError::DimensionOverflow { width, height })?;
        if bytes.len() != expected {
            return Err(ImageError::LengthMismatch {
                name: name.to_string(),
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            name,
            format,
            width,
            height,
            bytes,
        })
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub const fn stride(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y * self.stride() + x * self.format.bytes_per_pixel();
        let px = self.bytes.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + 'a {
        let stride = self.stride().max(1);
        let rows = if self.width == 0 { &[][..] } else { self.bytes };
        rows.chunks_exact(stride)
    }

    /// Pixels with straight alpha. Borrows for NRGBA, converts PRGBA.
    pub fn to_nrgba(&self) -> Cow<'a, [u8]> {
        match self.format {
            PixelFormat::Nrgba => Cow::Borrowed(self.bytes),
            PixelFormat::Prgba => Cow::Owned(
                self.bytes
                    .chunks_exact(4)
                    .flat_map(|px| unpremultiply([px[0], px[1], px[2], px[3]]))
                    .collect(),
            ),
        }
    }
}

const fn byte_len(format: PixelFormat, width: usize, height: usize) -> Option<usize> {
    match width.checked_mul(height) {
        Some(pixels) => pixels.checked_mul(format.bytes_per_pixel()),
        None => None,
    }
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let a16 = u16::from(a);
    let channel = |c: u8| ((u16::from(c) * 255 + a16 / 2) / a16).min(255) as u8;
    [channel(r), channel(g), channel(b), a]
}
