//! Single-file copy into an extension bucket.
//!
//! A copy never overwrites an existing destination file and never leaves a
//! truncated file at the destination path: bytes are streamed into a staging
//! file next to the target and only published under the final name once the
//! whole source has been written.

use color_eyre::eyre::{WrapErr, eyre};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::bucket::extension_bucket;
use crate::log::Logger;

static NEXT_STAGING_ID: AtomicU64 = AtomicU64::new(0);

/// Result of one copy task.
#[derive(Debug)]
pub enum CopyOutcome {
    /// The file was written to `bucket_dir`.
    Copied { bucket_dir: PathBuf },
    /// A file with the same name already existed in `bucket_dir`.
    Skipped { bucket_dir: PathBuf },
    Failed { error: color_eyre::Report },
}

/// Copies `file_path` into its extension bucket under `dest_root` and logs
/// the outcome.
///
/// Never fails from the caller's point of view: errors are logged with the
/// source path and returned as [`CopyOutcome::Failed`].
pub async fn copy_file(file_path: &Path, dest_root: &Path, logger: &Logger) -> CopyOutcome {
    let outcome = match try_copy(file_path, dest_root).await {
        Ok(outcome) => outcome,
        Err(error) => CopyOutcome::Failed { error },
    };

    let name = display_name(file_path);
    match &outcome {
        CopyOutcome::Copied { bucket_dir } => {
            logger.info(format!(
                "File {} has been copied to {}",
                name,
                bucket_dir.display()
            ));
        }
        CopyOutcome::Skipped { bucket_dir } => {
            logger.warning(format!(
                "File {} already exists in {}. Skipping copy.",
                name,
                bucket_dir.display()
            ));
        }
        CopyOutcome::Failed { error } => {
            logger.error(format!(
                "Error copying file {}: {:#}",
                file_path.display(),
                error
            ));
        }
    }

    outcome
}

async fn try_copy(file_path: &Path, dest_root: &Path) -> color_eyre::Result<CopyOutcome> {
    let file_name = file_path
        .file_name()
        .ok_or_else(|| eyre!("{} has no file name", file_path.display()))?;

    let bucket_dir = dest_root.join(extension_bucket(file_path));
    // create_dir_all treats an existing directory as success, so concurrent
    // copies into the same bucket are fine.
    fs::create_dir_all(&bucket_dir)
        .await
        .wrap_err_with(|| format!("Failed to create folder {}", bucket_dir.display()))?;

    let dest_path = bucket_dir.join(file_name);
    if fs::try_exists(&dest_path).await? {
        return Ok(CopyOutcome::Skipped { bucket_dir });
    }

    let staged = StagedFile::write(file_path, &bucket_dir).await?;
    if staged.publish(&dest_path).await? {
        Ok(CopyOutcome::Copied { bucket_dir })
    } else {
        Ok(CopyOutcome::Skipped { bucket_dir })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Fully written copy of a source file waiting to be published.
///
/// Every path out of `write` and `publish` removes the staging file unless it
/// was moved into place; `Drop` only catches what those paths could not.
struct StagedFile {
    path: PathBuf,
    settled: bool,
}

impl StagedFile {
    async fn write(source: &Path, bucket_dir: &Path) -> color_eyre::Result<Self> {
        let mut reader = fs::File::open(source)
            .await
            .wrap_err_with(|| format!("Failed to open {}", source.display()))?;

        let (staged, mut writer) = Self::create(bucket_dir).await?;

        let written = async {
            tokio::io::copy(&mut reader, &mut writer).await?;
            writer.flush().await
        }
        .await;
        drop(writer);

        if let Err(e) = written {
            staged.discard().await;
            return Err(e)
                .wrap_err_with(|| format!("Failed to copy bytes from {}", source.display()));
        }

        Ok(staged)
    }

    /// Staging names do not embed the source name, so they stay short
    /// whatever the length of the file being copied.
    async fn create(bucket_dir: &Path) -> color_eyre::Result<(Self, fs::File)> {
        loop {
            let id = NEXT_STAGING_ID.fetch_add(1, Ordering::Relaxed);
            let path = bucket_dir.join(format!(".extsort-{}-{}.part", std::process::id(), id));

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    return Ok((
                        Self {
                            path,
                            settled: false,
                        },
                        file,
                    ));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e).wrap_err_with(|| {
                        format!("Failed to create staging file {}", path.display())
                    });
                }
            }
        }
    }

    /// Publishes the staged bytes at `dest_path` without replacing an existing
    /// file. Returns `false` if another file claimed `dest_path` first.
    async fn publish(self, dest_path: &Path) -> color_eyre::Result<bool> {
        match fs::hard_link(&self.path, dest_path).await {
            Ok(()) => {
                self.discard().await;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                self.discard().await;
                Ok(false)
            }
            Err(_) => self.publish_by_rename(dest_path).await,
        }
    }

    /// Publish path for filesystems without hard links. The existence check
    /// and the rename are not atomic together.
    async fn publish_by_rename(mut self, dest_path: &Path) -> color_eyre::Result<bool> {
        match fs::try_exists(dest_path).await {
            Ok(false) => {}
            Ok(true) => {
                self.discard().await;
                return Ok(false);
            }
            Err(e) => {
                self.discard().await;
                return Err(e)
                    .wrap_err_with(|| format!("Failed to check {}", dest_path.display()));
            }
        }

        match fs::rename(&self.path, dest_path).await {
            Ok(()) => {
                self.settled = true;
                Ok(true)
            }
            Err(e) => {
                self.discard().await;
                Err(e).wrap_err_with(|| format!("Failed to write {}", dest_path.display()))
            }
        }
    }

    async fn discard(mut self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => self.settled = true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.settled = true,
            Err(_) => {}
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.settled {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
