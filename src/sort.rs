//! Sort run workflow.
//!
//! This module checks the source and destination paths, then walks the
//! source tree once and reports the start, end and tally of the run.

use color_eyre::eyre::WrapErr;
use std::path::Path;
use tokio::fs;
use tokio::sync::Semaphore;

use crate::config::CopyConfig;
use crate::log::Logger;
use crate::walker::{SortStats, walk};

/// Runs a full sort of `source` into `destination`.
///
/// Returns `Ok(None)` without touching anything if `source` is not a
/// directory or `destination` exists but is not one; the reason is logged.
/// A missing destination is created, including parents. Per-file and
/// per-folder failures never end the run; they are logged and counted in
/// the returned [`SortStats`]. At most `copy.max_concurrent_copies` copies
/// and folder listings have files open at any time.
///
/// # Errors
///
/// Returns an error only if the destination folder cannot be created.
pub async fn run_sort(
    source: &Path,
    destination: &Path,
    copy: &CopyConfig,
    logger: &Logger,
) -> color_eyre::Result<Option<SortStats>> {
    if !is_dir(source).await {
        logger.error(format!(
            "Error: The source folder {} does not exist or is not a directory.",
            source.display()
        ));
        return Ok(None);
    }

    if !fs::try_exists(destination).await.unwrap_or(false) {
        logger.info(format!(
            "Creating destination folder {}.",
            destination.display()
        ));
        fs::create_dir_all(destination).await.wrap_err_with(|| {
            format!("Failed to create destination folder {}", destination.display())
        })?;
    } else if !is_dir(destination).await {
        logger.error(format!(
            "Error: The destination {} exists and is not a directory.",
            destination.display()
        ));
        return Ok(None);
    }

    logger.custom("Starting file sorting...");
    let permits = Semaphore::new(copy.max_concurrent_copies.max(1));
    let stats = walk(source.to_path_buf(), destination, &permits, logger).await;
    logger.custom("File sorting completed.");
    logger.custom(format!(
        "Processed {} file(s): copied {}, skipped {}, failed {} ({} unreadable folder(s))",
        stats.total_files(),
        stats.copied,
        stats.skipped,
        stats.failed,
        stats.unreadable_dirs
    ));

    Ok(Some(stats))
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}
