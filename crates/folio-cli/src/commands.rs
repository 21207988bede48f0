// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations.

use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::human_errors::humanize_error;
use folio_core::{AppConfig, PageBounds};
use folio_document::sequence::{discover_bounds, order_directory, parse_bound};
use folio_document::{PageBatch, PdfWriter};
use tracing::{info, warn};

use crate::cli::{Cli, Command, ProcessArgs, SelectionArgs};
use crate::settings;

/// Run the parsed command. Returns false when the command ran but one of its
/// steps failed (already reported).
pub fn run(cli: Cli, config: AppConfig, data_dir: &Path) -> Result<bool> {
    match cli.command {
        Command::Config { reset } => cmd_config(config, data_dir, reset),
        Command::Bounds => {
            let config = apply_selection(config, &cli.selection)?;
            cmd_bounds(&config)
        }
        Command::Order { json } => {
            let config = apply_selection(config, &cli.selection)?;
            cmd_order(&config, &cli.selection, json)
        }
        Command::Process(args) => {
            let config = apply_selection(config, &cli.selection)?;
            cmd_process(config, &cli.selection, &args, data_dir)
        }
    }
}

/// Print an error the way a user should see it.
pub fn report_error(err: &FolioError) {
    let human = humanize_error(err);
    eprintln!("Error: {}", human.message);
    eprintln!("  {}", human.suggestion);
    tracing::debug!(error = %err, severity = ?human.severity, "Reported error");
}

// -- Selection ----------------------------------------------------------------

/// Layer the command-line selection over the saved configuration.
pub fn apply_selection(mut config: AppConfig, args: &SelectionArgs) -> Result<AppConfig> {
    if let Some(dir) = &args.dir {
        config.input_dir = Some(dir.clone());
    }
    if let Some(prefix) = &args.prefix {
        config.input_prefix = prefix.trim().to_string();
    }
    if args.interlace {
        config.interlace = true;
        config.reverse_even = args.reverse_even;
    }
    config.validate()?;
    Ok(config)
}

fn input_dir(config: &AppConfig) -> PathBuf {
    config.input_dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

/// Bounds from `--min`/`--max`, with any missing end taken from the pages on
/// disk, or `001` when there are none.
pub fn resolve_bounds(config: &AppConfig, args: &SelectionArgs) -> Result<PageBounds> {
    let min = args.min.as_deref().map(parse_bound).transpose()?;
    let max = args.max.as_deref().map(parse_bound).transpose()?;

    let discovered = match (min, max) {
        (Some(_), Some(_)) => None,
        _ => discover_bounds(&input_dir(config), &config.input_prefix)?,
    };
    let fallback = discovered.unwrap_or(PageBounds::FALLBACK);

    PageBounds::new(min.unwrap_or(fallback.min()), max.unwrap_or(fallback.max()))
}

// -- Commands -----------------------------------------------------------------

fn cmd_bounds(config: &AppConfig) -> Result<bool> {
    let dir = input_dir(config);
    match discover_bounds(&dir, &config.input_prefix)? {
        Some(bounds) => println!("{bounds}"),
        None => println!(
            "No pages named {}NNN.jpg in {}",
            config.input_prefix,
            dir.display()
        ),
    }
    Ok(true)
}

fn cmd_order(config: &AppConfig, selection: &SelectionArgs, json: bool) -> Result<bool> {
    let bounds = resolve_bounds(config, selection)?;
    let files = order_directory(&input_dir(config), &config.sequence(bounds))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else {
        for (index, file) in files.iter().enumerate() {
            println!("{:>4}. {}", index + 1, file.display());
        }
    }
    Ok(true)
}

fn cmd_config(config: AppConfig, data_dir: &Path, reset: bool) -> Result<bool> {
    let config = if reset {
        let defaults = AppConfig::default();
        settings::persist_config(data_dir, &defaults)?;
        println!("Configuration reset.");
        defaults
    } else {
        config
    };
    println!("# {}", settings::config_path(data_dir).display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(true)
}

fn cmd_process(
    mut config: AppConfig,
    selection: &SelectionArgs,
    args: &ProcessArgs,
    data_dir: &Path,
) -> Result<bool> {
    if !args.has_output_step() {
        return Err(FolioError::InvalidConfig(
            "no operation enabled: pass --save, --rename or --pdf".into(),
        ));
    }
    if let Some(prefix) = &args.out_prefix {
        config.output_prefix = prefix.trim().to_string();
    }
    if let Some(quality) = args.quality {
        config.jpeg_quality = quality;
    }
    if let Some(out) = &args.out {
        config.output_dir = Some(out.clone());
    }
    config.validate()?;

    let bounds = resolve_bounds(&config, selection)?;
    let in_dir = input_dir(&config);
    let mut batch = PageBatch::open(&in_dir, config.sequence(bounds))?;
    if batch.is_empty() {
        return Err(FolioError::InvalidSequence(format!(
            "no pages to process in {} ({bounds})",
            in_dir.display()
        )));
    }
    let out_dir = config.output_dir.clone().unwrap_or_else(|| in_dir.clone());
    let total = batch.len();
    let mut all_ok = true;

    // Adjust
    if let Some(brightness) = args.brightness {
        batch.store_mut().set_brightness(brightness);
    }
    if let Some(contrast) = args.contrast {
        batch.store_mut().set_contrast(contrast);
    }

    // Save edits
    if args.save {
        if !batch.store().is_edited() {
            println!("- There are no image edits to save");
        } else {
            let report = batch.save_edits(config.jpeg_quality);
            println!("- {}/{total} edits successfully saved", report.saved);
            if !report.failed.is_empty() {
                all_ok = false;
                println!("  The edits to the following pages could not be saved:");
                for &index in &report.failed {
                    println!("  > {}", batch.files()[index].display());
                }
            }
        }
    } else if args.adjusts() {
        println!("- Edits are not saved to the page files (pass --save to keep them)");
    }

    // Rename
    if args.rename {
        let old_files = batch.files().to_vec();
        match batch.rename(&out_dir, &config.output_prefix) {
            Ok(report) => {
                println!("- {}/{total} files successfully renamed", report.renamed());
                if !report.is_complete() {
                    all_ok = false;
                    println!("  The following files could not be renamed:");
                    for &index in &report.failed {
                        println!("  > {}", old_files[index].display());
                    }
                }
                config.after_rename(&out_dir);
                if let Err(err) = settings::persist_config(data_dir, &config) {
                    warn!(error = %err, "Could not save the updated configuration");
                }
            }
            Err(err) => {
                all_ok = false;
                report_error(&err);
            }
        }
    }

    // Export
    if let Some(name) = &args.pdf {
        let name = name.clone().unwrap_or_else(|| config.pdf_name.clone());
        let path = out_dir.join(format!("{name}.pdf"));
        let mut writer = PdfWriter::new(config.paper_size);
        writer.set_title(name);
        match batch.export_pdf(&writer, &path, args.overwrite) {
            Ok(()) => println!("- PDF saved to {}", path.display()),
            Err(err) => {
                all_ok = false;
                report_error(&err);
            }
        }
    }

    info!(pages = total, ok = all_ok, "Processing finished");
    Ok(all_ok)
}
