// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Folio: page number bounds, sequence configuration,
// page slots, and paper sizes.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Number of digits in a page number (`img007.jpg`).
pub const PAGE_NUMBER_DIGITS: usize = 3;

/// Largest page number expressible with [`PAGE_NUMBER_DIGITS`] digits.
pub const MAX_PAGE_NUMBER: u32 = 999;

/// Inclusive range of page numbers `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct PageBounds {
    min: u32,
    max: u32,
}

/// Unchecked wire form of [`PageBounds`].
#[derive(Deserialize)]
struct RawBounds {
    min: u32,
    max: u32,
}

impl TryFrom<RawBounds> for PageBounds {
    type Error = FolioError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl PageBounds {
    /// Every representable page number, `000..=999`.
    pub const FULL: PageBounds = PageBounds {
        min: 0,
        max: MAX_PAGE_NUMBER,
    };

    /// Bounds used when a directory holds no matching pages.
    pub const FALLBACK: PageBounds = PageBounds { min: 1, max: 1 };

    pub fn new(min: u32, max: u32) -> Result<Self> {
        if max > MAX_PAGE_NUMBER {
            return Err(FolioError::InvalidBound {
                value: max.to_string(),
                reason: format!("page numbers cannot exceed {MAX_PAGE_NUMBER}"),
            });
        }
        if min > max {
            return Err(FolioError::InvalidBound {
                value: format!("{min:03}"),
                reason: format!("the minimum number cannot be greater than the maximum ({max:03})"),
            });
        }
        Ok(Self { min, max })
    }

    /// Replace the lower bound, keeping the upper one.
    pub fn with_min(self, min: u32) -> Result<Self> {
        Self::new(min, self.max)
    }

    /// Replace the upper bound, keeping the lower one.
    pub fn with_max(self, max: u32) -> Result<Self> {
        if max < self.min {
            return Err(FolioError::InvalidBound {
                value: format!("{max:03}"),
                reason: format!("the maximum number cannot be less than the minimum ({:03})", self.min),
            });
        }
        Self::new(self.min, max)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of slots covered by the bounds.
    pub fn len(&self) -> usize {
        (self.max - self.min) as usize + 1
    }

    /// Always false: bounds cover at least one slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, number: u32) -> bool {
        (self.min..=self.max).contains(&number)
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl std::fmt::Display for PageBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}..={:03}", self.min, self.max)
    }
}

/// Which files make up a batch and how their pages are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceConfig {
    /// Filename prefix, trimmed. Matched case-insensitively.
    prefix: String,
    pub bounds: PageBounds,
    /// Odd sheet sides were scanned before all even sides.
    pub interlace: bool,
    /// Even sides were fed in reverse order. Only meaningful with `interlace`.
    pub reverse_even: bool,
}

impl SequenceConfig {
    pub fn new(prefix: &str, bounds: PageBounds) -> Self {
        Self {
            prefix: prefix.trim().to_string(),
            bounds,
            interlace: false,
            reverse_even: false,
        }
    }

    /// Set the scan order. `reverse_even` is ignored without `interlace`.
    pub fn with_order(mut self, interlace: bool, reverse_even: bool) -> Self {
        self.interlace = interlace;
        self.reverse_even = interlace && reverse_even;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.trim().to_string();
    }
}

/// One numeric position in the expected sequence.
///
/// `Absent` marks a page whose file no longer exists. It is dropped from the
/// final order but still decides where its neighbours land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSlot<T> {
    Present(T),
    Absent,
}

impl<T> PageSlot<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn into_present(self) -> Option<T> {
        match self {
            Self::Present(page) => Some(page),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for PageSlot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(page) => Self::Present(page),
            None => Self::Absent,
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    #[default]
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}
