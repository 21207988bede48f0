// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequence module — filename validation, bounds discovery, and page ordering.

pub mod discovery;
pub mod sequencer;
pub mod validator;

pub use discovery::{discover_bounds, scan_pages};
pub use sequencer::{order_directory, order_pages, order_slots};
pub use validator::{is_page_file, page_file_name, parse_bound, parse_page_number};
