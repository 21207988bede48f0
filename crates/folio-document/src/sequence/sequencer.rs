// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page ordering — undoes double-sided interlaced scanning.
//
// A duplex-less scanner captures every sheet front first (pages 1, 3, 5, ...)
// and then every back (2, 4, 6, ...), possibly in reverse feed order. The
// numbered files therefore hold the fronts in their first half and the backs
// in their second half; merging the halves positionally restores reading
// order.

use std::path::{Path, PathBuf};

use folio_core::error::Result;
use folio_core::types::{PageSlot, SequenceConfig};
use tracing::{debug, instrument};

use super::discovery::scan_pages;

/// Order pages for `config`, asking `resolve` for the page behind each number.
///
/// Numbers for which `resolve` returns `None` become absent slots: they are
/// left out of the result but still take part in the odd/even split.
pub fn order_pages<T>(config: &SequenceConfig, mut resolve: impl FnMut(u32) -> Option<T>) -> Vec<T> {
    let slots = config
        .bounds
        .iter()
        .map(|number| PageSlot::from(resolve(number)))
        .collect();
    order_slots(slots, config.interlace, config.reverse_even)
}

/// Order an explicit list of slots.
///
/// Without `interlace` the present pages keep their numeric order. With it,
/// the first `ceil(n/2)` slots are the odd pages and the rest the even pages;
/// `reverse_even` flips the even half before the two are merged.
pub fn order_slots<T>(slots: Vec<PageSlot<T>>, interlace: bool, reverse_even: bool) -> Vec<T> {
    if !interlace {
        return slots.into_iter().filter_map(PageSlot::into_present).collect();
    }

    let mut odds = slots;
    let mut evens = odds.split_off(odds.len().div_ceil(2));
    if reverse_even {
        evens.reverse();
    }
    merge_alternating(odds, evens)
}

/// Take one slot from each list in turn, skipping absent ones. When one list
/// runs out the rest of the other is appended as is.
fn merge_alternating<T>(odds: Vec<PageSlot<T>>, evens: Vec<PageSlot<T>>) -> Vec<T> {
    let mut merged = Vec::with_capacity(odds.len() + evens.len());
    let mut odds = odds.into_iter();
    let mut evens = evens.into_iter();

    loop {
        match (odds.next(), evens.next()) {
            (Some(odd), Some(even)) => {
                merged.extend(odd.into_present());
                merged.extend(even.into_present());
            }
            (Some(odd), None) => {
                merged.extend(odd.into_present());
                merged.extend(odds.by_ref().filter_map(PageSlot::into_present));
                break;
            }
            (None, Some(even)) => {
                merged.extend(even.into_present());
                merged.extend(evens.by_ref().filter_map(PageSlot::into_present));
                break;
            }
            (None, None) => break,
        }
    }

    merged
}

/// Order the page files of `config` found in `dir`.
///
/// Numbers inside the bounds with no matching file (pages deleted after the
/// scan) are treated as absent slots.
#[instrument(skip_all, fields(dir = %dir.display(), prefix = %config.prefix()))]
pub fn order_directory(dir: &Path, config: &SequenceConfig) -> Result<Vec<PathBuf>> {
    let mut pages = scan_pages(dir, config.prefix(), config.bounds)?;
    let ordered = order_pages(config, |number| pages.remove(&number));
    debug!(
        pages = ordered.len(),
        slots = config.bounds.len(),
        interlace = config.interlace,
        reverse_even = config.reverse_even,
        "Pages ordered"
    );
    Ok(ordered)
}
