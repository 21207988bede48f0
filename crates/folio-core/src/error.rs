// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folio.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    // -- Validation errors --
    #[error("invalid page number {value:?}: {reason}")]
    InvalidBound { value: String, reason: String },

    #[error("invalid page sequence: {0}")]
    InvalidSequence(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Load / decode errors --
    #[error("failed to load page {}: {reason}", path.display())]
    PageLoad { path: PathBuf, reason: String },

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Contract violations --
    #[error("page index {index} out of range for {len} pages")]
    PageIndex { index: usize, len: usize },

    // -- Export errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("rename target already exists: {}", .0.display())]
    RenameCollision(PathBuf),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;
