// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch rename — give ordered pages fresh sequential names
// (`<prefix>001.jpg`, `<prefix>002.jpg`, ...) in an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::types::MAX_PAGE_NUMBER;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::sequence::page_file_name;

/// Outcome of a batch rename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    /// New path of every page, in page order, whether or not its rename worked.
    pub targets: Vec<PathBuf>,
    /// Indices of the pages that could not be renamed.
    pub failed: Vec<usize>,
}

impl RenameReport {
    pub fn renamed(&self) -> usize {
        self.targets.len() - self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Target paths for `count` pages, numbered from 001.
pub fn rename_targets(count: usize, out_dir: &Path, out_prefix: &str) -> Vec<PathBuf> {
    (1..=count as u32)
        .map(|number| out_dir.join(page_file_name(out_prefix, number)))
        .collect()
}

/// Move `files` (already in reading order) to `out_dir` under sequential
/// names.
///
/// Nothing is renamed if any target name is already taken: the first one
/// found is reported as [`FolioError::RenameCollision`]. Once renaming
/// starts, individual failures are recorded in the report and the rest of
/// the batch carries on.
#[instrument(skip(files), fields(pages = files.len(), out_dir = %out_dir.display()))]
pub fn rename_pages(files: &[PathBuf], out_dir: &Path, out_prefix: &str) -> Result<RenameReport> {
    if out_prefix.trim().is_empty() {
        return Err(FolioError::InvalidConfig("output prefix must not be empty".into()));
    }
    if files.len() > MAX_PAGE_NUMBER as usize {
        return Err(FolioError::InvalidSequence(format!(
            "{} pages cannot be numbered with three digits",
            files.len()
        )));
    }

    let targets = rename_targets(files.len(), out_dir, out_prefix);
    if let Some(taken) = targets.iter().find(|target| target.exists()) {
        return Err(FolioError::RenameCollision(taken.clone()));
    }

    fs::create_dir_all(out_dir)?;

    let mut failed = Vec::new();
    for (index, (source, target)) in files.iter().zip(&targets).enumerate() {
        if let Err(err) = fs::rename(source, target) {
            warn!(
                index,
                source = %source.display(),
                target = %target.display(),
                error = %err,
                "Rename failed"
            );
            failed.push(index);
        }
    }

    let report = RenameReport { targets, failed };
    info!(renamed = report.renamed(), failed = report.failed.len(), "Pages renamed");
    Ok(report)
}
