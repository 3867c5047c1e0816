use image::DynamicImage;
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions accepted by the upload prompt (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Placeholder shown when nothing has been loaded
pub const EMPTY_PLACEHOLDER: &str = "Project Prototype Image";
/// Placeholder shown when a stored record has no image
pub const ABSENT_PLACEHOLDER: &str = "No Image Available";
/// Placeholder shown when image bytes cannot be decoded
pub const UNREADABLE_PLACEHOLDER: &str = "Image display error";

/// Failure to obtain image bytes from disk
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Unsupported image file {path:?} (expected jpg, png, gif or bmp)")]
    UnsupportedExtension { path: PathBuf },

    #[error("Error reading image file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Image bytes that could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("Failed to decode image: {0}")]
pub struct DecodeError(#[from] image::ImageError);

/// Check the file extension against SUPPORTED_EXTENSIONS
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read an image file fully into memory
///
/// Only the extension is checked; the bytes are not validated.
pub fn read_image_file(path: &Path) -> Result<Vec<u8>, FileError> {
    if !is_supported_path(path) {
        return Err(FileError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let data = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Read {} bytes from {:?}", data.len(), path);
    Ok(data)
}

/// Decode raw bytes in any format the image crate recognises
pub fn decode(data: &[u8]) -> Result<DynamicImage, DecodeError> {
    Ok(image::load_from_memory(data)?)
}

/// Resample to exactly width x height
///
/// Aspect ratio is not preserved: the bitmap is stretched to fill the box.
pub fn scale_to_fit(bitmap: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    bitmap.resize_exact(width.max(1), height.max(1), FilterType::CatmullRom)
}

/// What the image panel shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Preview {
    /// Nothing loaded yet
    #[default]
    Empty,
    /// Stored record without an image
    Absent,
    /// Decoded bitmap ready for scaling
    Image(DynamicImage),
    /// Bytes present but not decodable
    Unreadable,
}

impl Preview {
    /// Build a preview from stored or uploaded bytes
    /// Empty input is Absent; decode failures degrade to Unreadable
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.is_empty() {
            return Preview::Absent;
        }

        match decode(data) {
            Ok(bitmap) => Preview::Image(bitmap),
            Err(e) => {
                log::warn!("{}", e);
                Preview::Unreadable
            }
        }
    }

    /// Text to show instead of a bitmap, None when an image is available
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Preview::Empty => Some(EMPTY_PLACEHOLDER),
            Preview::Absent => Some(ABSENT_PLACEHOLDER),
            Preview::Image(_) => None,
            Preview::Unreadable => Some(UNREADABLE_PLACEHOLDER),
        }
    }

    pub fn bitmap(&self) -> Option<&DynamicImage> {
        match self {
            Preview::Image(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

/// Encode a solid-colour image for tests
#[cfg(test)]
pub(crate) fn sample_image_bytes(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    let bitmap = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 30, 30])));
    let mut cursor = Cursor::new(Vec::new());
    bitmap.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}
