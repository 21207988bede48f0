// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — luma statistics, brightness/contrast passes, page raster
// I/O, and the photometric store.

pub mod photometric;
pub mod processor;
pub mod store;

pub use photometric::Photometrics;
pub use store::PhotometricStore;
