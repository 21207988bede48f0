// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::{PageBounds, PaperSize, SequenceConfig};

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the scanned pages (current directory when unset).
    pub input_dir: Option<PathBuf>,
    /// Filename prefix of the scanned pages.
    pub input_prefix: String,
    /// Directory receiving renamed pages and the PDF (input directory when unset).
    pub output_dir: Option<PathBuf>,
    /// Filename prefix given to renamed pages.
    pub output_prefix: String,
    /// Output prefix used when the default one would equal the input prefix.
    pub backup_output_prefix: String,
    /// PDF file name, without extension.
    pub pdf_name: String,
    /// Page size of exported PDFs.
    pub paper_size: PaperSize,
    /// JPEG quality (1-100) used when saving edited pages.
    pub jpeg_quality: u8,
    /// Odd sides were scanned before even sides.
    pub interlace: bool,
    /// Even sides were fed in reverse order.
    pub reverse_even: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            input_prefix: "img".into(),
            output_dir: None,
            output_prefix: "out".into(),
            backup_output_prefix: "output".into(),
            pdf_name: "merged_pages".into(),
            paper_size: PaperSize::Letter,
            jpeg_quality: 90,
            interlace: false,
            reverse_even: false,
        }
    }
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FolioError::InvalidConfig(
                "jpeg_quality must be 1-100".into(),
            ));
        }
        if self.input_prefix.trim().is_empty() || self.output_prefix.trim().is_empty() {
            return Err(FolioError::InvalidConfig(
                "file prefixes must not be empty".into(),
            ));
        }
        if self.pdf_name.trim().is_empty() {
            return Err(FolioError::InvalidConfig("pdf_name must not be empty".into()));
        }
        if self.reverse_even && !self.interlace {
            return Err(FolioError::InvalidConfig(
                "reverse_even requires interlace".into(),
            ));
        }
        Ok(())
    }

    /// Build the sequence configuration for the given bounds.
    pub fn sequence(&self, bounds: PageBounds) -> SequenceConfig {
        SequenceConfig::new(&self.input_prefix, bounds).with_order(self.interlace, self.reverse_even)
    }

    /// Point the input side at a freshly renamed batch.
    ///
    /// Renamed pages are already in reading order, so interlacing is turned
    /// off, and the output prefix goes back to its default (or the backup
    /// prefix when the default now names the input).
    pub fn after_rename(&mut self, output_dir: &Path) {
        let defaults = Self::default();
        self.input_prefix = self.output_prefix.trim().to_string();
        self.input_dir = Some(output_dir.to_path_buf());
        self.output_prefix = if defaults.output_prefix.eq_ignore_ascii_case(&self.input_prefix) {
            self.backup_output_prefix.clone()
        } else {
            defaults.output_prefix
        };
        self.interlace = false;
        self.reverse_even = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let config = AppConfig {
            jpeg_quality: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_reverse_even_without_interlace() {
        let config = AppConfig {
            reverse_even: true,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"input_prefix": "scan"}"#).unwrap();
        assert_eq!(config.input_prefix, "scan");
        assert_eq!(config.pdf_name, "merged_pages");
        assert_eq!(config.paper_size, PaperSize::Letter);
    }

    #[test]
    fn after_rename_swaps_prefixes_and_clears_interlace() {
        let mut config = AppConfig {
            output_prefix: "book".into(),
            interlace: true,
            reverse_even: true,
            ..AppConfig::default()
        };
        config.after_rename(Path::new("/scans/out"));
        assert_eq!(config.input_prefix, "book");
        assert_eq!(config.output_prefix, "out");
        assert_eq!(config.input_dir.as_deref(), Some(Path::new("/scans/out")));
        assert!(!config.interlace && !config.reverse_even);
    }

    #[test]
    fn after_rename_uses_backup_prefix_on_clash() {
        let mut config = AppConfig::default();
        config.after_rename(Path::new("/scans"));
        assert_eq!(config.input_prefix, "out");
        assert_eq!(config.output_prefix, "output");
    }

    #[test]
    fn sequence_carries_ordering_flags() {
        let config = AppConfig {
            interlace: true,
            reverse_even: true,
            ..AppConfig::default()
        };
        let sequence = config.sequence(PageBounds::FALLBACK);
        assert!(sequence.interlace && sequence.reverse_even);
        assert_eq!(sequence.prefix(), "img");
    }
}
