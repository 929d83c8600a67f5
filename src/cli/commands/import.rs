//! Import command: load eBird exports from disk for one participant

use super::shared::{create_progress_bar, discover_csv_files, load_configuration, open_service};
use crate::Error;
use crate::cli::args::{GlobalArgs, ImportArgs};
use anyhow::Context;
use colored::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Totals across every file of one import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub files_imported: usize,
    pub files_failed: Vec<(PathBuf, String)>,
    pub total_rows: usize,
    pub imported: usize,
    pub duplicates: usize,
    pub rejected: usize,
    /// Species total after the last successful file
    pub species_count: usize,
    pub elapsed: Duration,
}

pub async fn run_import(
    global: &GlobalArgs,
    args: ImportArgs,
    shutdown: CancellationToken,
) -> anyhow::Result<ImportSummary> {
    let start_time = Instant::now();
    args.validate()?;

    let files = discover_csv_files(&args.input_path);
    if files.is_empty() {
        anyhow::bail!("No CSV files found under {}", args.input_path.display());
    }

    let config = load_configuration(global)?;
    let service = open_service(config)?;
    let user = service
        .ensure_user(&args.email)
        .await
        .with_context(|| format!("Cannot import for '{}'", args.email))?;
    info!(
        "Importing {} files for user {} ({})",
        files.len(),
        user.id,
        user.email
    );

    let progress = global
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Importing"));
    let mut summary = ImportSummary::default();

    for file in &files {
        if shutdown.is_cancelled() {
            return Err(Error::processing_interrupted("Import interrupted by user").into());
        }

        match service.import_file(user.id, file).await {
            Ok(stats) => {
                summary.files_imported += 1;
                summary.total_rows += stats.total_rows;
                summary.imported += stats.imported;
                summary.duplicates += stats.duplicates;
                summary.rejected += stats.not_countable + stats.out_of_range + stats.other_rejected;
                summary.species_count = stats.species_count;
            }
            Err(e) => {
                warn!("Failed to import {}: {}", file.display(), e);
                summary.files_failed.push((file.clone(), e.to_string()));
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    summary.elapsed = start_time.elapsed();

    if !global.quiet {
        print_summary(&user.email, &summary);
    }
    Ok(summary)
}

fn print_summary(email: &str, summary: &ImportSummary) {
    println!("\n{}", "Import Summary".bright_green().bold());
    println!("  Participant:  {}", email.bright_white().bold());
    println!(
        "  Files:        {} imported, {} failed",
        summary.files_imported,
        if summary.files_failed.is_empty() {
            "0".normal()
        } else {
            summary.files_failed.len().to_string().bright_red().bold()
        }
    );
    println!("  Rows:         {}", summary.total_rows);
    println!(
        "  New sightings: {}",
        summary.imported.to_string().bright_white().bold()
    );
    println!("  Duplicates:   {}", summary.duplicates);
    println!("  Rejected:     {}", summary.rejected);
    println!(
        "  Species:      {}",
        summary.species_count.to_string().bright_green().bold()
    );
    println!("  Time:         {:.2}s", summary.elapsed.as_secs_f64());

    for (file, reason) in &summary.files_failed {
        println!("  {} {}: {}", "✗".bright_red(), file.display(), reason);
    }
}
