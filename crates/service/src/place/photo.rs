//! Uploaded photo checks and blob naming.

use image::ImageFormat;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Blob name prefix for uploaded photos.
pub const PHOTO_PREFIX: &str = "user_images/";

const ACCEPTED: [ImageFormat; 4] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif, ImageFormat::WebP];

#[derive(Debug)]
pub struct ValidPhoto {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ValidPhoto {
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    /// Fresh, collision-free blob name for this photo.
    pub fn blob_name(&self) -> String {
        format!("{PHOTO_PREFIX}{}.{}", Uuid::new_v4(), self.extension())
    }
}

/// Accept only non-empty uploads within `max_bytes` that decode as one of
/// the accepted image formats.
pub fn validate_photo(bytes: Vec<u8>, max_bytes: usize) -> Result<ValidPhoto, ServiceError> {
    if bytes.is_empty() {
        return Err(ServiceError::Validation("the submitted photo is empty".into()));
    }
    if bytes.len() > max_bytes {
        return Err(ServiceError::Validation(format!("photo is too large ({} bytes, limit {max_bytes})", bytes.len())));
    }
    let format = image::guess_format(&bytes)
        .map_err(|_| ServiceError::Validation("upload a valid image; the file is not a recognised picture".into()))?;
    if !ACCEPTED.contains(&format) {
        return Err(ServiceError::Validation(format!("unsupported image format {format:?}")));
    }
    image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| ServiceError::Validation(format!("upload a valid image; decoding failed: {e}")))?;
    Ok(ValidPhoto { bytes, format })
}

#[cfg(test)]
pub(crate) fn sample_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}
