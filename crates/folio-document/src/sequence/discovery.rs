// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory scanning — finds the page files of a prefix and the numeric
// bounds they span.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use folio_core::error::Result;
use folio_core::types::PageBounds;
use tracing::{debug, instrument, warn};

use super::validator::parse_page_number;

/// Map every page number in `bounds` to the file holding it.
///
/// The directory is listed once. When two names carry the same number
/// (`img001.jpg` and `IMG001.jpeg`) the lexicographically first one wins.
#[instrument(skip_all, fields(dir = %dir.display(), prefix = %prefix, bounds = %bounds))]
pub fn scan_pages(dir: &Path, prefix: &str, bounds: PageBounds) -> Result<BTreeMap<u32, PathBuf>> {
    let mut candidates: Vec<(u32, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                warn!(error = %err, "Unreadable directory entry skipped");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let number = parse_page_number(name, prefix)?;
            bounds.contains(number).then_some((number, path))
        })
        .collect();
    candidates.sort();

    let mut pages: BTreeMap<u32, PathBuf> = BTreeMap::new();
    for (number, path) in candidates {
        if let Some(kept) = pages.get(&number) {
            warn!(
                number,
                kept = %kept.display(),
                ignored = %path.display(),
                "Duplicate page number"
            );
            continue;
        }
        pages.insert(number, path);
    }

    debug!(count = pages.len(), "Page files found");
    Ok(pages)
}

/// Find the lowest and highest page numbers present for `prefix`.
///
/// Every number `000..=999` is considered, regardless of the bounds
/// currently in use. Returns `None` when no file matches.
pub fn discover_bounds(dir: &Path, prefix: &str) -> Result<Option<PageBounds>> {
    let pages = scan_pages(dir, prefix, PageBounds::FULL)?;
    let (Some((&min, _)), Some((&max, _))) = (pages.first_key_value(), pages.last_key_value())
    else {
        return Ok(None);
    };
    Ok(Some(PageBounds::new(min, max)?))
}
