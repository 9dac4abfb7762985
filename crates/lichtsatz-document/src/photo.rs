// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Uploaded photo handling. Decodes PNG/JPEG bytes and normalizes the color
// model to three-channel RGB8 before anything else touches the image.

use image::{DynamicImage, ImageFormat, RgbImage};
use lichtsatz_core::error::{LichtsatzError, Result};
use tracing::{debug, info, instrument};

/// An uploaded photo, decoded and normalized to RGB8.
///
/// The photo is read-only through the pipeline: recognition reads its pixel
/// buffer, assembly embeds it, and nothing persists it. Every constructor
/// converts to RGB8 up front so the recognition engines and the PDF embedder
/// see the same three-channel data.
pub struct UploadedPhoto {
    image: RgbImage,
}

impl UploadedPhoto {
    // -- Construction ---------------------------------------------------------

    /// Decode a photo from raw encoded bytes (PNG or JPEG).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(data).map_err(|err| {
            LichtsatzError::Image(format!("failed to decode photo: {err}"))
        })?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Photo decoded from bytes"
        );
        Ok(Self::from_dynamic(decoded))
    }

    /// Load a photo from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let decoded = image::open(path.as_ref()).map_err(|err| {
            LichtsatzError::Image(format!(
                "failed to open {}: {err}",
                path.as_ref().display()
            ))
        })?;
        info!(
            width = decoded.width(),
            height = decoded.height(),
            "Photo loaded"
        );
        Ok(Self::from_dynamic(decoded))
    }

    /// Wrap an already-decoded image, normalizing to RGB8.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }

    /// Wrap an RGB8 buffer directly.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Photo width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Photo height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Borrow the normalized RGB8 buffer.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    // -- Output ---------------------------------------------------------------

    /// Re-encode the photo as PNG bytes (used to hand it to tesseract).
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| LichtsatzError::Image(format!("PNG encoding failed: {err}")))?;
        Ok(buffer)
    }
}
