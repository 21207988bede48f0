// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Order, adjust, rename and bundle double-sided page scans")]
#[command(long_about = "\
Order, adjust, rename and bundle double-sided page scans

Pages are JPEG files named <prefix><NNN>.jpg (or .jpeg), NNN being exactly
three digits. With --interlace the first half of the numbers is taken to hold
the odd pages and the second half the even pages, as produced by scanning all
fronts and then all backs; --reverse-even handles backs fed in reverse.

Settings not given on the command line come from the saved configuration
(see 'folio config').")]
pub struct Cli {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Which pages to work on and how they were scanned.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Directory holding the scanned pages
    #[arg(long, value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Filename prefix of the pages (case-insensitive)
    #[arg(long, value_name = "PREFIX", global = true)]
    pub prefix: Option<String>,

    /// Lowest page number, three digits (discovered when omitted)
    #[arg(long, value_name = "NNN", global = true)]
    pub min: Option<String>,

    /// Highest page number, three digits (discovered when omitted)
    #[arg(long, value_name = "NNN", global = true)]
    pub max: Option<String>,

    /// All odd pages were scanned before all even pages
    #[arg(long, global = true)]
    pub interlace: bool,

    /// The even pages were scanned last page first
    #[arg(long, global = true, requires = "interlace")]
    pub reverse_even: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the lowest and highest page numbers found
    Bounds,
    /// Print the pages in reading order
    Order {
        /// Print a JSON array instead of a numbered list
        #[arg(long)]
        json: bool,
    },
    /// Adjust, save, rename and export the pages
    Process(ProcessArgs),
    /// Show or reset the saved configuration
    Config {
        /// Restore and save the default configuration
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProcessArgs {
    /// Brightness, -100 (darkest) to 100 (brightest); 0 keeps the scan as is
    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-100..=100)
    )]
    pub brightness: Option<i32>,

    /// Contrast, -100 (flattest) to 100 (strongest); 0 keeps the scan as is
    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-100..=100)
    )]
    pub contrast: Option<i32>,

    /// Write brightness/contrast edits back over the page files
    #[arg(long)]
    pub save: bool,

    /// Rename the pages in reading order to <output prefix>001.jpg, ...
    #[arg(long)]
    pub rename: bool,

    /// Export all pages as one PDF, optionally naming it (without .pdf)
    #[arg(long, value_name = "NAME")]
    pub pdf: Option<Option<String>>,

    /// Output directory for renamed pages and the PDF
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Output prefix for renamed pages
    #[arg(long, value_name = "PREFIX")]
    pub out_prefix: Option<String>,

    /// Replace an existing PDF of the same name
    #[arg(long)]
    pub overwrite: bool,

    /// JPEG quality used when saving edits, 1-100
    #[arg(long, value_name = "Q", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

impl ProcessArgs {
    pub fn adjusts(&self) -> bool {
        self.brightness.is_some() || self.contrast.is_some()
    }

    /// True when at least one step leaves something on disk.
    pub fn has_output_step(&self) -> bool {
        self.save || self.rename || self.pdf.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_adjustments() {
        let cli = Cli::try_parse_from(["folio", "process", "--brightness", "-40", "--contrast", "25", "--save"])
            .unwrap();
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.brightness, Some(-40));
        assert_eq!(args.contrast, Some(25));
        assert!(args.has_output_step());
    }

    #[test]
    fn adjustment_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "process", "--brightness", "101", "--save"]).is_err());
    }

    #[test]
    fn pdf_name_is_optional() {
        let cli = Cli::try_parse_from(["folio", "process", "--pdf"]).unwrap();
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.pdf, Some(None));

        let cli = Cli::try_parse_from(["folio", "process", "--pdf", "book"]).unwrap();
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.pdf, Some(Some("book".to_string())));
    }

    #[test]
    fn reverse_even_requires_interlace() {
        assert!(Cli::try_parse_from(["folio", "--reverse-even", "order"]).is_err());
        let cli = Cli::try_parse_from(["folio", "order", "--interlace", "--reverse-even"]).unwrap();
        assert!(cli.selection.interlace && cli.selection.reverse_even);
    }

    #[test]
    fn selection_flags_are_global() {
        let cli = Cli::try_parse_from(["folio", "bounds", "--dir", "/scans", "--prefix", "scan"]).unwrap();
        assert_eq!(cli.selection.dir, Some(PathBuf::from("/scans")));
        assert_eq!(cli.selection.prefix.as_deref(), Some("scan"));
    }
}
