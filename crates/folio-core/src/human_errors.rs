// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity tells the caller whether to re-prompt, retry, or give up.

use crate::error::FolioError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Temporary problem (busy disk, interrupted write). Trying again may work.
    Transient,
    /// The user must change an input or clear something on disk first.
    ActionRequired,
    /// Retrying will not help: damaged file or internal contract violation.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether repeating the same operation may succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `FolioError` into a `HumanError`.
pub fn humanize_error(err: &FolioError) -> HumanError {
    match err {
        // -- Validation --
        FolioError::InvalidBound { value, reason } => HumanError {
            message: format!("\"{value}\" isn't a usable page number."),
            suggestion: format!("Enter exactly three digits, e.g. 007 ({reason})."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::InvalidSequence(detail) => HumanError {
            message: "Those pages can't be put in order.".into(),
            suggestion: format!("Check the prefix and page range. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::InvalidConfig(detail) => HumanError {
            message: "The settings don't make sense together.".into(),
            suggestion: format!("Fix the setting and try again, or reset the configuration. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Loading --
        FolioError::PageLoad { path, .. } => HumanError {
            message: format!("The page {} couldn't be opened.", path.display()),
            suggestion: "The image may be damaged. None of the pages were loaded; remove or re-scan that page and try again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        FolioError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        FolioError::PageIndex { index, len } => HumanError {
            message: format!("There is no page {} (only {len} loaded).", index + 1),
            suggestion: "Reload the pages and pick one from the list. Nothing was changed.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Export --
        FolioError::PdfError(_) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: "Check there is free space in the output folder and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FolioError::OutputExists(path) => HumanError {
            message: format!("{} already exists.", path.display()),
            suggestion: "Choose a different name, or allow overwriting.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::RenameCollision(path) => HumanError {
            message: "The files couldn't be renamed due to a name collision in the output folder.".into(),
            suggestion: format!("{} is already taken. Pick another output prefix or folder; no file was renamed.", path.display()),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        FolioError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file or folder couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Folio doesn't have permission to use that file.".into(),
                    suggestion: "Check the file and folder permissions, then try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        FolioError::Serialization(_) => HumanError {
            message: "The saved settings couldn't be read or written.".into(),
            suggestion: "Try again, or reset the configuration with `folio config --reset`.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
