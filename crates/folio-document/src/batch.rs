// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page batch — the ordered page files of a directory together with their
// photometric store, kept index-aligned through deletes, saves and renames.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::types::{PageBounds, SequenceConfig};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::image::processor::save_jpeg;
use crate::image::store::PhotometricStore;
use crate::pdf::writer::PdfWriter;
use crate::rename::{RenameReport, rename_pages};
use crate::sequence::order_directory;

/// Outcome of writing edits back to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub saved: usize,
    /// Indices of the pages whose file could not be written.
    pub failed: Vec<usize>,
}

/// One working session over a directory of scanned pages.
#[derive(Debug)]
pub struct PageBatch {
    dir: PathBuf,
    config: SequenceConfig,
    files: Vec<PathBuf>,
    store: PhotometricStore,
}

impl PageBatch {
    // -- Construction ---------------------------------------------------------

    /// Order the pages in `dir` and load them. Fails as a whole if any page
    /// cannot be decoded.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display(), bounds = %config.bounds))]
    pub fn open(dir: impl AsRef<Path>, config: SequenceConfig) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let files = order_directory(&dir, &config)?;
        let store = PhotometricStore::load(&files)?;
        info!(pages = files.len(), "Batch opened");
        Ok(Self {
            dir,
            config,
            files,
            store,
        })
    }

    /// Rebuild the batch for a new directory or sequence configuration.
    ///
    /// The current batch is only replaced once the new one has loaded; on
    /// error it is left exactly as it was.
    pub fn reconfigure(&mut self, dir: impl AsRef<Path>, config: SequenceConfig) -> Result<()> {
        *self = Self::open(dir, config)?;
        Ok(())
    }

    // -- Accessors ------------------------------------------------------------

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Page files in reading order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn store(&self) -> &PhotometricStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PhotometricStore {
        &mut self.store
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    // -- Operations -----------------------------------------------------------

    /// Delete page `index` from disk and from the batch.
    ///
    /// The page is only dropped from the batch once its file is gone, so a
    /// failed delete leaves everything in place. A file that has already
    /// disappeared counts as deleted.
    #[instrument(skip(self))]
    pub fn delete_page(&mut self, index: usize) -> Result<PathBuf> {
        let Some(path) = self.files.get(index) else {
            return Err(FolioError::PageIndex {
                index,
                len: self.files.len(),
            });
        };
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Page file already gone");
            }
            Err(err) => return Err(err.into()),
        }

        let removed = self.files.remove(index);
        self.store.delete(index)?;
        info!(path = %removed.display(), remaining = self.files.len(), "Page deleted");
        Ok(removed)
    }

    /// Commit the current edits and write every page back over its file.
    ///
    /// Pages that fail to write are listed in the report; the others are
    /// still saved.
    #[instrument(skip(self), fields(pages = self.files.len()))]
    pub fn save_edits(&mut self, quality: u8) -> SaveReport {
        self.store.set_default();

        let mut report = SaveReport::default();
        for (index, (raster, path)) in self.store.rasters().zip(&self.files).enumerate() {
            match save_jpeg(raster, path, quality) {
                Ok(()) => report.saved += 1,
                Err(err) => {
                    warn!(index, path = %path.display(), error = %err, "Could not save page");
                    report.failed.push(index);
                }
            }
        }

        info!(saved = report.saved, failed = report.failed.len(), "Edits saved");
        report
    }

    /// Rename the pages, in reading order, to `<out_prefix>NNN.jpg` in
    /// `out_dir`.
    ///
    /// Renamed pages take their new path. When every page was renamed the
    /// batch now describes `out_dir` with `out_prefix`, in plain order.
    pub fn rename(&mut self, out_dir: &Path, out_prefix: &str) -> Result<RenameReport> {
        let report = rename_pages(&self.files, out_dir, out_prefix)?;

        for (index, (file, target)) in self.files.iter_mut().zip(&report.targets).enumerate() {
            if !report.failed.contains(&index) {
                *file = target.clone();
            }
        }

        if report.is_complete() && !self.files.is_empty() {
            let last = self.files.len() as u32;
            self.dir = out_dir.to_path_buf();
            self.config = SequenceConfig::new(out_prefix, PageBounds::new(1, last)?);
        }
        Ok(report)
    }

    /// Export the current working rasters as one PDF.
    pub fn export_pdf(&self, writer: &PdfWriter, path: &Path, overwrite: bool) -> Result<()> {
        writer.write_to_file(self.store.rasters(), path, overwrite)
    }
}
