use image::{ImageError, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Could not read upload: {0}")]
    Unreadable(#[from] io::Error),
    #[error("Unrecognised image format")]
    UnknownFormat,
    #[error("Malformed image: {0}")]
    Malformed(#[from] ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Sniffs the format from the leading bytes (the file name plays no part)
/// and decodes the header far enough to read the dimensions.
pub fn probe_image(path: &Path) -> Result<ImageInfo, ValidationError> {
    let file = File::open(path)?;
    let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
    let format = reader.format().ok_or(ValidationError::UnknownFormat)?;
    let (width, height) = reader.into_dimensions()?;

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_image(format: ImageFormat) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        let img = RgbImage::from_pixel(3, 2, Rgb([200, 10, 10]));
        let mut out = file.reopen().unwrap();
        img.write_to(&mut out, format).unwrap();
        file
    }

    #[test]
    fn test_probe_png() {
        let file = write_image(ImageFormat::Png);
        let info = probe_image(file.path()).unwrap();
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!((info.width, info.height), (3, 2));
    }

    #[test]
    fn test_probe_other_formats() {
        for format in [ImageFormat::Jpeg, ImageFormat::Bmp, ImageFormat::Tiff] {
            let file = write_image(format);
            let info = probe_image(file.path()).unwrap();
            assert_eq!(info.format, format);
        }
    }

    #[test]
    fn test_probe_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"just some text pretending to be a jpeg")
            .unwrap();

        let result = probe_image(file.path());
        assert!(matches!(result, Err(ValidationError::UnknownFormat)));
    }

    #[test]
    fn test_probe_truncated_header() {
        // PNG signature followed by garbage instead of an IHDR chunk
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG\r\n\x1a\nnot really a png")
            .unwrap();

        let result = probe_image(file.path());
        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_probe_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(probe_image(file.path()).is_err());
    }

    #[test]
    fn test_probe_missing_file() {
        let result = probe_image(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(ValidationError::Unreadable(_))));
    }
}
