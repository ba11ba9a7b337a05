//! # extsort - Sort Files by Extension
//!
//! extsort copies every file below a source folder into a destination folder,
//! grouped into subfolders named after each file's lowercased extension.
//! Files without an extension go to `unknown`. Existing destination files are
//! never overwritten, and a failure on one file or folder is logged without
//! stopping the rest of the run.
//!
//! ## Command Line Usage
//!
//! ```bash
//! extsort --source ~/Downloads --destination ~/Sorted
//! extsort -s /mnt/card -d ./photos --theme cyan
//! ```
//!
//! Produces `~/Sorted/pdf/report.pdf`, `~/Sorted/jpg/IMG_0001.JPG`,
//! `~/Sorted/unknown/Makefile`, and so on.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use extsort::config::CopyConfig;
//! use extsort::log::Logger;
//! use extsort::sort::run_sort;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let logger = Logger::memory();
//!     if let Some(stats) = run_sort(
//!         Path::new("/mnt/card"),
//!         Path::new("/srv/sorted"),
//!         &CopyConfig::default(),
//!         &logger,
//!     )
//!     .await?
//!     {
//!         println!("Copied {} files", stats.copied);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! extsort uses a TOML configuration file located at `~/.config/extsort/config.toml`,
//! created with defaults on first run:
//!
//! ```toml
//! [ui.color]
//! theme = "default"
//!
//! [copy]
//! max_concurrent_copies = 10
//!
//! [log]
//! timestamp_format = "%Y-%m-%d %H:%M:%S"
//! color = true
//! ```
//!
//! ## Module Organization
//!
//! - [`bucket`]: Extension bucket naming
//! - [`cli`]: Command-line argument parsing
//! - [`config`]: Configuration management
//! - [`copier`]: Single-file copy into a bucket
//! - [`log`]: Styled run logging
//! - [`sort`]: Path checks and the top-level run
//! - [`walker`]: Concurrent recursive directory walk

pub mod bucket;
pub mod cli;
pub mod config;
pub mod copier;
pub mod log;
pub mod sort;
pub mod walker;

// Re-export commonly used types
pub use config::Config;
pub use copier::CopyOutcome;
pub use log::Logger;
pub use walker::SortStats;
