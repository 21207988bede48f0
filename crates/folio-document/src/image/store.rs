// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photometric store — non-destructive brightness/contrast editing over a batch
// of page rasters.
//
// Every page keeps an untouched original next to its working copy, plus the
// brightness and contrast measured at load (or at the last commit) and the
// values most recently requested. Adjustments are always expressed relative
// to the baseline, so input 0 returns a page to its baseline statistics.
// Pixels are never re-measured after an edit.

use std::path::Path;

use folio_core::error::{FolioError, Result};
use image::RgbaImage;
use tracing::{debug, info, instrument};

use super::photometric::{
    self, MAX_BRIGHTNESS_FACTOR, MAX_CONTRAST_FACTOR, MIN_BRIGHTNESS_FACTOR, MIN_CONTRAST_FACTOR,
    Photometrics,
};
use super::processor::open_page;

/// One page: baseline and working rasters with their statistics.
#[derive(Debug, Clone)]
struct PhotometricRecord {
    original: RgbaImage,
    edited: RgbaImage,
    initial: Photometrics,
    current: Photometrics,
}

impl PhotometricRecord {
    fn new(original: RgbaImage) -> Self {
        let stats = photometric::measure(&original);
        Self {
            edited: original.clone(),
            original,
            initial: stats,
            current: stats,
        }
    }
}

/// Index-aligned photometric records for a batch of pages.
#[derive(Debug, Clone, Default)]
pub struct PhotometricStore {
    records: Vec<PhotometricRecord>,
    /// Set by any adjustment that changed a page; cleared by reset and commit.
    edited: bool,
}

impl PhotometricStore {
    // -- Construction ---------------------------------------------------------

    /// Decode and measure every page in order.
    ///
    /// Fails with [`FolioError::PageLoad`] on the first page that cannot be
    /// decoded. No store is built in that case.
    #[instrument(skip_all, fields(pages = paths.len()))]
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let rasters = paths
            .iter()
            .map(|path| open_page(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let store = Self::from_rasters(rasters);
        info!(pages = store.len(), "Photometric store built");
        Ok(store)
    }

    /// Build a store from rasters already in memory.
    pub fn from_rasters(rasters: Vec<RgbaImage>) -> Self {
        Self {
            records: rasters.into_iter().map(PhotometricRecord::new).collect(),
            edited: false,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True iff some page was adjusted since the last reset or commit.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// The working raster of page `index`.
    pub fn get(&self, index: usize) -> Result<&RgbaImage> {
        self.record(index).map(|record| &record.edited)
    }

    /// The baseline raster of page `index`.
    pub fn get_original(&self, index: usize) -> Result<&RgbaImage> {
        self.record(index).map(|record| &record.original)
    }

    /// Baseline statistics of page `index`.
    pub fn initial(&self, index: usize) -> Result<Photometrics> {
        self.record(index).map(|record| record.initial)
    }

    /// Statistics last requested for page `index`.
    pub fn current(&self, index: usize) -> Result<Photometrics> {
        self.record(index).map(|record| record.current)
    }

    /// Working rasters in page order.
    pub fn rasters(&self) -> impl Iterator<Item = &RgbaImage> {
        self.records.iter().map(|record| &record.edited)
    }

    fn record(&self, index: usize) -> Result<&PhotometricRecord> {
        self.records.get(index).ok_or(FolioError::PageIndex {
            index,
            len: self.records.len(),
        })
    }

    // -- Adjustments ----------------------------------------------------------

    /// Move every page's brightness to the level `input` (-100..=100) maps to.
    #[instrument(skip(self), fields(pages = self.records.len()))]
    pub fn set_brightness(&mut self, input: i32) {
        let mut changed = 0usize;
        for (page, record) in self.records.iter_mut().enumerate() {
            let target = photometric::map_adjustment(
                input,
                record.initial.brightness,
                MIN_BRIGHTNESS_FACTOR,
                MAX_BRIGHTNESS_FACTOR,
            );
            if target == record.current.brightness {
                continue;
            }

            let offset = photometric::brightness_offset(target, record.current.brightness);
            photometric::shift_brightness(&mut record.edited, offset);
            record.current.brightness = target;
            changed += 1;
            debug!(page, offset, target, "Brightness applied");
        }

        if changed > 0 {
            self.edited = true;
        }
        info!(changed, "Brightness adjusted");
    }

    /// Move every page's contrast to the level `input` (-100..=100) maps to.
    ///
    /// Deviations are scaled around the page's current brightness. Flat pages
    /// have zero contrast at every input and are left untouched.
    #[instrument(skip(self), fields(pages = self.records.len()))]
    pub fn set_contrast(&mut self, input: i32) {
        let mut changed = 0usize;
        for (page, record) in self.records.iter_mut().enumerate() {
            let target = photometric::map_adjustment(
                input,
                record.initial.contrast,
                MIN_CONTRAST_FACTOR,
                MAX_CONTRAST_FACTOR,
            );
            if target == record.current.contrast {
                continue;
            }

            let factor = photometric::contrast_factor(target, record.current.contrast);
            photometric::scale_contrast(&mut record.edited, factor, record.current.brightness);
            record.current.contrast = target;
            changed += 1;
            debug!(page, factor, target, "Contrast applied");
        }

        if changed > 0 {
            self.edited = true;
        }
        info!(changed, "Contrast adjusted");
    }

    // -- Baseline management --------------------------------------------------

    /// Throw away every edit since load or the last commit.
    pub fn reset(&mut self) {
        for record in &mut self.records {
            record.edited = record.original.clone();
            record.current = record.initial;
        }
        self.edited = false;
        debug!(pages = self.records.len(), "Edits discarded");
    }

    /// Commit: the working rasters become the new baseline.
    pub fn set_default(&mut self) {
        for record in &mut self.records {
            record.original = record.edited.clone();
            record.initial = record.current;
        }
        self.edited = false;
        debug!(pages = self.records.len(), "Edits committed");
    }

    /// Remove page `index`; later pages move down by one.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.record(index)?;
        self.records.remove(index);
        debug!(index, remaining = self.records.len(), "Page removed from store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn flat(value: u8) -> RgbaImage {
        RgbaImage::from_pixel(6, 4, Rgba([value, value, value, 255]))
    }

    fn textured(seed: u8) -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            let v = (x * 23 + y * 11) as u8;
            Rgba([v.wrapping_add(seed), v / 2 + seed / 2, 200 - v / 2, 255])
        })
    }

    fn sample_store() -> PhotometricStore {
        PhotometricStore::from_rasters(vec![textured(10), textured(60), flat(30)])
    }

    #[test]
    fn fresh_store_is_clean_with_equal_buffers() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert!(!store.is_edited());
        for i in 0..store.len() {
            assert_eq!(store.get(i).unwrap(), store.get_original(i).unwrap());
            assert_eq!(store.initial(i).unwrap(), store.current(i).unwrap());
        }
    }

    #[test]
    fn zero_brightness_restores_initial_exactly() {
        let mut store = sample_store();
        store.set_brightness(40);
        store.set_brightness(-75);
        store.set_brightness(0);
        for i in 0..store.len() {
            assert_eq!(
                store.current(i).unwrap().brightness,
                store.initial(i).unwrap().brightness
            );
        }
    }

    #[test]
    fn zero_contrast_restores_initial_exactly() {
        let mut store = sample_store();
        store.set_contrast(90);
        store.set_contrast(0);
        for i in 0..store.len() {
            assert_eq!(
                store.current(i).unwrap().contrast,
                store.initial(i).unwrap().contrast
            );
        }
    }

    #[test]
    fn brightness_moves_the_working_copy_only() {
        let mut store = sample_store();
        let before = store.get_original(0).unwrap().clone();
        store.set_brightness(-50);

        assert!(store.is_edited());
        assert_eq!(store.get_original(0).unwrap(), &before);
        let measured = photometric::measure(store.get(0).unwrap());
        assert!(measured.brightness < store.initial(0).unwrap().brightness);
    }

    #[test]
    fn unchanged_target_does_not_mark_edited() {
        let mut store = sample_store();
        store.set_brightness(0);
        store.set_contrast(0);
        assert!(!store.is_edited());
    }

    #[test]
    fn reset_makes_working_copy_match_original() {
        let mut store = sample_store();
        store.set_brightness(70);
        store.set_contrast(-40);
        store.reset();

        assert!(!store.is_edited());
        for i in 0..store.len() {
            assert_eq!(store.get(i).unwrap(), store.get_original(i).unwrap());
            assert_eq!(store.current(i).unwrap(), store.initial(i).unwrap());
        }
    }

    #[test]
    fn reset_after_commit_changes_nothing() {
        let mut store = sample_store();
        store.set_brightness(30);
        store.set_default();
        assert!(!store.is_edited());

        let committed: Vec<_> = store.rasters().cloned().collect();
        let stats: Vec<_> = (0..store.len()).map(|i| store.current(i).unwrap()).collect();
        store.reset();

        assert!(!store.is_edited());
        for i in 0..store.len() {
            assert_eq!(store.get(i).unwrap(), &committed[i]);
            assert_eq!(store.initial(i).unwrap(), stats[i]);
        }
    }

    #[test]
    fn commit_rebases_the_adjustment_range() {
        let mut store = PhotometricStore::from_rasters(vec![flat(100)]);
        store.set_brightness(-100);
        let lowered = store.current(0).unwrap().brightness;
        store.set_default();
        assert_eq!(store.initial(0).unwrap().brightness, lowered);

        store.set_brightness(0);
        assert!(!store.is_edited());
    }

    #[test]
    fn white_page_clamps_at_full_brightness() {
        let mut store = PhotometricStore::from_rasters(vec![flat(255)]);
        store.set_brightness(100);
        assert!(store.get(0).unwrap().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn flat_page_contrast_is_left_alone() {
        let mut store = PhotometricStore::from_rasters(vec![flat(90)]);
        store.set_contrast(80);
        assert_eq!(store.get(0).unwrap(), &flat(90));
        assert_eq!(store.current(0).unwrap().contrast, store.initial(0).unwrap().contrast);
    }

    #[test]
    fn delete_shifts_later_pages_down() {
        let mut store = sample_store();
        store.set_brightness(20);
        let last = store.get(2).unwrap().clone();
        let last_stats = (store.initial(2).unwrap(), store.current(2).unwrap());

        store.delete(1).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap(), &last);
        assert_eq!((store.initial(1).unwrap(), store.current(1).unwrap()), last_stats);
    }

    #[test]
    fn out_of_range_index_fails_without_mutation() {
        let mut store = sample_store();
        assert!(matches!(store.get(3), Err(FolioError::PageIndex { index: 3, len: 3 })));
        assert!(store.get_original(9).is_err());
        assert!(store.delete(3).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_is_all_or_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("img001.jpg");
        let bad = tmp.path().join("img002.jpg");
        super::super::processor::save_jpeg(&textured(5), &good, 90).unwrap();
        std::fs::write(&bad, b"garbage").unwrap();

        let err = PhotometricStore::load(&[good.clone(), bad.clone()]).unwrap_err();
        assert!(matches!(err, FolioError::PageLoad { path, .. } if path == bad));

        let store = PhotometricStore::load(&[good]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().dimensions(), (8, 8));
    }
}
