//! Command-line interface definitions.
//!
//! This module defines the CLI structure using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extsort")]
#[command(about = "Sort files by their extensions")]
#[command(version)]
pub struct Args {
    /// Path to the source folder
    #[arg(short, long)]
    pub source: PathBuf,

    /// Path to the destination folder
    #[arg(short, long)]
    pub destination: PathBuf,

    /// Read configuration from this file instead of ~/.config/extsort/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Color theme for log output (overrides the config file)
    #[arg(long)]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::try_parse_from(["extsort", "-s", "/in", "-d", "/out"]).unwrap();

        assert_eq!(args.source, PathBuf::from("/in"));
        assert_eq!(args.destination, PathBuf::from("/out"));
        assert!(args.config.is_none());
        assert!(args.theme.is_none());
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::try_parse_from([
            "extsort",
            "--source",
            "/in",
            "--destination",
            "/out",
            "--config",
            "/etc/extsort.toml",
            "--theme",
            "cyan",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/etc/extsort.toml")));
        assert_eq!(args.theme.as_deref(), Some("cyan"));
    }

    #[test]
    fn test_args_require_both_paths() {
        assert!(Args::try_parse_from(["extsort", "-s", "/in"]).is_err());
        assert!(Args::try_parse_from(["extsort", "-d", "/out"]).is_err());
    }
}
