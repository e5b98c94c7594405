use crate::image::{Image, PixelFormat};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub name: String,
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    pub byte_len: usize,
}

impl From<&Image<'_>> for ImageSummary {
    fn from(image: &Image<'_>) -> Self {
        Self {
            name: image.name().to_string(),
            format: image.format(),
            width: image.width(),
            height: image.height(),
            byte_len: image.bytes().len(),
        }
    }
}

impl fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{}, {}, {} bytes",
            self.name, self.width, self.height, self.format, self.byte_len
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ExportFormat {
    /// The buffer exactly as embedded.
    #[default]
    Raw,
    Png,
}

impl ExportFormat {
    pub fn extension(self, format: PixelFormat) -> &'static str {
        match self {
            ExportFormat::Raw => format.tag(),
            ExportFormat::Png => "png",
        }
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(ExportFormat::Raw),
            "png" => Ok(ExportFormat::Png),
            other => anyhow::bail!("unsupported export format '{other}', expected raw or png"),
        }
    }
}

/// Writes `image` into `dir` and returns the path of the new file.
pub fn export_image(image: &Image<'_>, dir: &Path, format: ExportFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let path = dir.join(format!("{}.{}", image.name(), format.extension(image.format())));
    debug!("exporting {} to {}", image.name(), path.display());

    match format {
        ExportFormat::Raw => fs::write(&path, image.bytes())
            .with_context(|| format!("failed to write {}", path.display()))?,
        ExportFormat::Png => {
            let width = u32::try_from(image.width()).context("image too wide for png")?;
            let height = u32::try_from(image.height()).context("image too tall for png")?;
            ::image::save_buffer_with_format(
                &path,
                &image.to_nrgba(),
                width,
                height,
                ::image::ExtendedColorType::Rgba8,
                ::image::ImageFormat::Png,
            )
            .with_context(|| format!("failed to encode {}", path.display()))?;
        }
    }

    Ok(path)
}

pub fn verify_catalog(images: &[&Image<'_>]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut names = HashSet::new();
    let mut sizes = HashSet::new();

    for image in images {
        let expected = image.width() * image.height() * image.format().bytes_per_pixel();
        if image.bytes().len() != expected {
            problems.push(format!(
                "{}: {} bytes, expected {expected}",
                image.name(),
                image.bytes().len()
            ));
        }
        if image.format() != PixelFormat::Nrgba {
            problems.push(format!("{}: format is {}, expected nrgba", image.name(), image.format()));
        }
        if image.width() != image.height() {
            problems.push(format!(
                "{}: icon is not square ({}x{})",
                image.name(),
                image.width(),
                image.height()
            ));
        }
        if !names.insert(image.name()) {
            problems.push(format!("{}: duplicate name", image.name()));
        }
        if !sizes.insert(image.width()) {
            problems.push(format!("{}: duplicate size {}", image.name(), image.width()));
        }
    }

    for problem in &problems {
        warn!("{problem}");
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_display() {
        let bytes = [0u8; 16];
        let image = Image::try_new("tiny", PixelFormat::Nrgba, 2, 2, &bytes).unwrap();
        let summary = ImageSummary::from(&image);
        assert_eq!(summary.to_string(), "tiny 2x2, nrgba, 16 bytes");
    }

    #[test]
    fn export_format_parses() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("raw".parse::<ExportFormat>().unwrap(), ExportFormat::Raw);
        assert!("bmp".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Raw.extension(PixelFormat::Prgba), "prgba");
    }

    #[test]
    fn verify_flags_duplicates_and_formats() {
        let bytes = [0u8; 16];
        let a = Image::try_new("a", PixelFormat::Nrgba, 2, 2, &bytes).unwrap();
        let b = Image::try_new("a", PixelFormat::Prgba, 2, 2, &bytes).unwrap();
        let c = Image::try_new("c", PixelFormat::Nrgba, 4, 1, &bytes).unwrap();

        let problems = verify_catalog(&[&a, &b, &c]);
        assert_eq!(
            problems,
            vec![
                "a: format is prgba, expected nrgba".to_string(),
                "a: duplicate name".to_string(),
                "a: duplicate size 2".to_string(),
                "c: icon is not square (4x1)".to_string(),
            ]
        );
        assert!(verify_catalog(&[&a]).is_empty());
    }
}
