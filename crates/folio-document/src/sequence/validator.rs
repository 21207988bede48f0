// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page filename validation — `<prefix><NNN>.jpg|.jpeg`, case-insensitive,
// NNN zero-padded to exactly three digits.

use folio_core::error::{FolioError, Result};
use folio_core::types::{PAGE_NUMBER_DIGITS, PageBounds};

const EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Render a page number as exactly three digits (`7` → `"007"`).
pub fn format_number(number: u32) -> String {
    format!("{number:03}")
}

/// Build the canonical file name for a page (`img` + `7` → `img007.jpg`).
pub fn page_file_name(prefix: &str, number: u32) -> String {
    format!("{}{}.jpg", prefix.trim(), format_number(number))
}

/// Extract the page number from `filename`, ignoring bounds.
///
/// Returns `None` unless the name is `prefix` (trimmed, any case) followed by
/// exactly three ASCII digits and a `.jpg` / `.jpeg` extension (any case).
pub fn parse_page_number(filename: &str, prefix: &str) -> Option<u32> {
    let lower = filename.to_lowercase();
    let stem = EXTENSIONS
        .iter()
        .find_map(|ext| lower.strip_suffix(ext))?;
    let digits = stem.strip_prefix(prefix.trim().to_lowercase().as_str())?;

    if digits.len() != PAGE_NUMBER_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// True iff `filename` is a page of `prefix` whose number lies within `bounds`.
pub fn is_page_file(filename: &str, prefix: &str, bounds: PageBounds) -> bool {
    parse_page_number(filename, prefix).is_some_and(|number| bounds.contains(number))
}

/// Parse a bound typed by the user. Exactly three digits are required.
pub fn parse_bound(text: &str) -> Result<u32> {
    if text.chars().count() != PAGE_NUMBER_DIGITS {
        return Err(FolioError::InvalidBound {
            value: text.to_string(),
            reason: format!("the number must have a length of {PAGE_NUMBER_DIGITS}"),
        });
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FolioError::InvalidBound {
            value: text.to_string(),
            reason: "not a valid non-negative integer".into(),
        });
    }
    text.parse().map_err(|_| FolioError::InvalidBound {
        value: text.to_string(),
        reason: "not a valid non-negative integer".into(),
    })
}
