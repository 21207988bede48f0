// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page raster I/O — decode page files into RGBA buffers and encode edited
// buffers back to JPEG.

use std::fs;
use std::path::Path;

use folio_core::error::{FolioError, Result};
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, RgbaImage};
use tracing::{debug, info, instrument};

/// Decode a page file into an RGBA buffer.
///
/// Any failure, including a missing file, is reported as
/// [`FolioError::PageLoad`] naming the page.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn open_page(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|err| FolioError::PageLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    debug!(width = img.width(), height = img.height(), "Page decoded");
    Ok(img.to_rgba8())
}

/// Encode a buffer as JPEG bytes with the given quality (1-100).
///
/// JPEG carries no alpha, so the alpha channel is dropped.
pub fn to_jpeg_bytes(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb: RgbImage = image.convert();
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|err| FolioError::ImageError(format!("JPEG encoding failed: {err}")))?;
    Ok(buffer)
}

/// Write `image` to `path` as JPEG, replacing any existing file.
///
/// The whole image is encoded before the file is touched, so an encoding
/// failure leaves the old file intact.
#[instrument(skip(image, path), fields(path = %path.display()))]
pub fn save_jpeg(image: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let bytes = to_jpeg_bytes(image, quality)?;
    fs::write(path, &bytes)?;
    info!(bytes = bytes.len(), "Page written");
    Ok(())
}
