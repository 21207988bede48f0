// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — assemble page rasters into a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::io::Write;
use std::path::Path;

use folio_core::PaperSize;
use folio_core::error::{FolioError, Result};
use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

/// Nominal resolution of a scanned page. Only sets the unscaled size; every
/// page is scaled to fit anyway.
const SCAN_DPI: f32 = 300.0;

/// Writes one full page per raster onto a fixed paper size.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new(PaperSize::default())
    }
}

/// Where an image lands on the page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    scale: f32,
    x: f32,
    y: f32,
}

/// Scale an image to fill as much of the page as its aspect ratio allows and
/// centre it. No margin is kept.
fn fit_to_page(img_w_pt: f32, img_h_pt: f32, page_w_pt: f32, page_h_pt: f32) -> Placement {
    let scale = (page_w_pt / img_w_pt).min(page_h_pt / img_h_pt);
    Placement {
        scale,
        x: (page_w_pt - img_w_pt * scale) / 2.0,
        y: (page_h_pt - img_h_pt * scale) / 2.0,
    }
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Rasters to PDF -------------------------------------------------------

    /// Build a PDF with one page per raster, in order.
    ///
    /// Fails with [`FolioError::PdfError`] when there are no rasters or one of
    /// them has no pixels.
    #[instrument(skip_all, fields(paper = ?self.paper_size))]
    pub fn create_from_rasters<'a, I>(&self, rasters: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = &'a RgbaImage>,
    {
        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let title = self.title.as_deref().unwrap_or("Scanned pages");

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::new();

        for (index, raster) in rasters.into_iter().enumerate() {
            let (width, height) = raster.dimensions();
            if width == 0 || height == 0 {
                return Err(FolioError::PdfError(format!("page {} has no pixels", index + 1)));
            }

            // printpdf wants RGB8; alpha is dropped.
            let rgb: RgbImage = raster.convert();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: width as usize,
                height: height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let img_w_pt = width as f32 / SCAN_DPI * 72.0;
            let img_h_pt = height as f32 / SCAN_DPI * 72.0;
            let placement = fit_to_page(img_w_pt, img_h_pt, page_w_pt, page_h_pt);

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(placement.x)),
                    translate_y: Some(Pt(placement.y)),
                    scale_x: Some(placement.scale),
                    scale_y: Some(placement.scale),
                    dpi: Some(SCAN_DPI),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));
            debug!(page = index + 1, width, height, scale = placement.scale, "Page placed");
        }

        if pages.is_empty() {
            return Err(FolioError::PdfError("no pages to export".into()));
        }

        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings");
        }

        info!(pages = page_count, bytes = output.len(), "PDF assembled");
        Ok(output)
    }

    // -- File output ----------------------------------------------------------

    /// Build the PDF and write it to `path`.
    ///
    /// The bytes go to a temporary file next to `path` which is then moved
    /// into place, so a failed export never leaves a partial PDF behind. An
    /// existing `path` is an [`FolioError::OutputExists`] unless `overwrite`
    /// is set.
    #[instrument(skip(self, rasters, path), fields(path = %path.display()))]
    pub fn write_to_file<'a, I>(&self, rasters: I, path: &Path, overwrite: bool) -> Result<()>
    where
        I: IntoIterator<Item = &'a RgbaImage>,
    {
        if !overwrite && path.exists() {
            return Err(FolioError::OutputExists(path.to_path_buf()));
        }

        let bytes = self.create_from_rasters(rasters)?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;

        let persisted = if overwrite {
            tmp.persist(path)
        } else {
            tmp.persist_noclobber(path)
        };
        persisted.map_err(|err| {
            if err.error.kind() == std::io::ErrorKind::AlreadyExists {
                FolioError::OutputExists(path.to_path_buf())
            } else {
                FolioError::Io(err.error)
            }
        })?;

        info!(bytes = bytes.len(), "Wrote PDF to {}", path.display());
        Ok(())
    }
}
