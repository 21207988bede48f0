// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-document — Page sequencing and photometric editing for scanned pages.
//
// Provides page filename validation and bounds discovery, the interlace-aware
// page sequencer, the non-destructive brightness/contrast store, and the
// rename and PDF export steps that consume the ordered pages.

pub mod batch;
pub mod image;
pub mod pdf;
pub mod rename;
pub mod sequence;

#[cfg(test)]
mod test_helpers;

// Re-export the primary types so callers can use `folio_document::PageBatch` etc.
pub use batch::{PageBatch, SaveReport};
pub use image::photometric::Photometrics;
pub use image::store::PhotometricStore;
pub use pdf::writer::PdfWriter;
pub use rename::{RenameReport, rename_pages};
