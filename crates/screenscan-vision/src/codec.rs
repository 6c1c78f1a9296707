// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster boundary: decode source photos, validate them for the pipeline, and
// encode the binary output as PNG. Uses the `image` crate for all codecs.

use image::{DynamicImage, GrayImage, ImageFormat};
use screenscan_core::error::{Result, ScreenScanError};
use tracing::{debug, info, instrument};

/// Decode an image file (JPEG, PNG, TIFF, etc.) from disk.
///
/// Unreadable or undecodable content is an input rejection. The format is
/// sniffed from the content, not the extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<std::path::Path>) -> Result<DynamicImage> {
    let data = std::fs::read(path.as_ref()).map_err(|err| {
        ScreenScanError::InvalidInput(format!(
            "unable to read source image {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    let image = decode(&data)?;
    info!(
        width = image.width(),
        height = image.height(),
        "Source image loaded"
    );
    Ok(image)
}

/// Decode an image from raw encoded bytes.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    if data.is_empty() {
        return Err(ScreenScanError::InvalidInput("image data is empty".into()));
    }
    let image = image::load_from_memory(data).map_err(|err| {
        ScreenScanError::InvalidInput(format!("failed to decode image: {}", err))
    })?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Image decoded from bytes"
    );
    Ok(image)
}

/// Reject rasters the pipeline cannot work on: anything less than two
/// pixels wide or tall has no area to rectify.
pub fn validate(image: &DynamicImage) -> Result<()> {
    if image.width() < 2 || image.height() < 2 {
        return Err(ScreenScanError::InvalidInput(format!(
            "image is too small to process ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Encode a grayscale raster as PNG bytes.
pub fn to_png_bytes(image: &GrayImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| ScreenScanError::ImageError(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn png_bytes_decode_back() {
        let gray = GrayImage::from_fn(8, 4, |x, _| Luma([if x < 4 { 0 } else { 255 }]));
        let bytes = to_png_bytes(&gray).unwrap();
        let decoded = decode(&bytes).unwrap().to_luma8();
        assert_eq!(decoded, gray);
    }

    #[test]
    fn garbage_bytes_are_invalid_input() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ScreenScanError::InvalidInput(_)));

        let err = decode(&[]).unwrap_err();
        assert!(matches!(err, ScreenScanError::InvalidInput(_)));
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let err = open("/nonexistent/screen.jpg").unwrap_err();
        assert!(matches!(err, ScreenScanError::InvalidInput(_)));
    }

    #[test]
    fn zero_sized_raster_rejected() {
        let err = validate(&DynamicImage::new_luma8(0, 0)).unwrap_err();
        assert!(matches!(err, ScreenScanError::InvalidInput(_)));
        assert!(validate(&DynamicImage::new_rgb8(3, 2)).is_ok());
    }

    #[test]
    fn single_row_or_column_rejected() {
        for (w, h) in [(1, 50), (50, 1), (1, 1)] {
            let err = validate(&DynamicImage::new_luma8(w, h)).unwrap_err();
            assert!(matches!(err, ScreenScanError::InvalidInput(_)), "{w}x{h}");
        }
        assert!(validate(&DynamicImage::new_luma8(2, 2)).is_ok());
    }
}
