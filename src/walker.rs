//! Recursive directory walk.
//!
//! Every directory level lists its entries, turns each file into a copy task
//! and each subdirectory into a nested walk, then runs all of those tasks
//! concurrently and waits for the whole subtree before returning. Tasks hand
//! their results back by value, so no state is shared between them.

use futures::future::{BoxFuture, FutureExt, join_all};
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Semaphore;

use crate::copier::{CopyOutcome, copy_file};
use crate::log::Logger;

/// Tally of task outcomes for a subtree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortStats {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Directories whose listing failed
    pub unreadable_dirs: usize,
}

impl SortStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files the walk handed to the copier.
    pub fn total_files(&self) -> usize {
        self.copied + self.skipped + self.failed
    }

    fn unreadable_dir() -> Self {
        Self {
            unreadable_dirs: 1,
            ..Self::default()
        }
    }
}

impl From<&CopyOutcome> for SortStats {
    fn from(outcome: &CopyOutcome) -> Self {
        let mut stats = Self::new();
        match outcome {
            CopyOutcome::Copied { .. } => stats.copied = 1,
            CopyOutcome::Skipped { .. } => stats.skipped = 1,
            CopyOutcome::Failed { .. } => stats.failed = 1,
        }
        stats
    }
}

impl Add for SortStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            copied: self.copied + other.copied,
            skipped: self.skipped + other.skipped,
            failed: self.failed + other.failed,
            unreadable_dirs: self.unreadable_dirs + other.unreadable_dirs,
        }
    }
}

impl AddAssign for SortStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Walks `source_dir` and copies every file below it into `dest_root`.
///
/// Entries are classified after following symlinks: regular files are copied,
/// directories are walked, everything else (broken links, sockets, fifos,
/// devices) is ignored. A symlink to an ancestor folder is walked again on
/// every pass until the OS rejects the path with `ELOOP`. If the directory
/// cannot be listed, the error is logged and the subtree contributes no tasks.
///
/// Every directory listing and every file copy holds one of `permits` while
/// it has files open. A permit is never held while waiting on child tasks.
///
/// # Examples
///
/// ```no_run
/// use std::path::{Path, PathBuf};
/// use tokio::sync::Semaphore;
/// use extsort::log::Logger;
/// use extsort::walker::walk;
///
/// # async fn example() {
/// let logger = Logger::memory();
/// let permits = Semaphore::new(10);
/// let stats = walk(PathBuf::from("/mnt/photos"), Path::new("/srv/sorted"), &permits, &logger).await;
/// println!("copied {} files", stats.copied);
/// # }
/// ```
pub fn walk<'a>(
    source_dir: PathBuf,
    dest_root: &'a Path,
    permits: &'a Semaphore,
    logger: &'a Logger,
) -> BoxFuture<'a, SortStats> {
    async move {
        let listed = {
            let _permit = permits.acquire().await.ok();
            list_tasks(&source_dir, dest_root, permits, logger).await
        };

        let tasks = match listed {
            Ok(tasks) => tasks,
            Err(e) => {
                logger.error(format!(
                    "Error reading folder {}: {}",
                    source_dir.display(),
                    e
                ));
                return SortStats::unreadable_dir();
            }
        };

        join_all(tasks)
            .await
            .into_iter()
            .fold(SortStats::new(), |acc, stats| acc + stats)
    }
    .boxed()
}

/// Lists one directory level and builds its tasks.
///
/// Nothing is started until the listing has completed, so a listing that
/// fails halfway yields no tasks at all.
async fn list_tasks<'a>(
    source_dir: &Path,
    dest_root: &'a Path,
    permits: &'a Semaphore,
    logger: &'a Logger,
) -> std::io::Result<Vec<BoxFuture<'a, SortStats>>> {
    let mut entries = fs::read_dir(source_dir).await?;
    let mut tasks: Vec<BoxFuture<'a, SortStats>> = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let Ok(metadata) = fs::metadata(&path).await else {
            continue;
        };

        if metadata.is_file() {
            tasks.push(
                async move {
                    let _permit = permits.acquire().await.ok();
                    let outcome = copy_file(&path, dest_root, logger).await;
                    SortStats::from(&outcome)
                }
                .boxed(),
            );
        } else if metadata.is_dir() {
            tasks.push(walk(path, dest_root, permits, logger));
        }
    }

    Ok(tasks)
}
