// src/main.rs
use clap::Parser;

use extsort::cli::Args;
use extsort::config::Config;
use extsort::log::Logger;
use extsort::sort::run_sort;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let theme = args.theme.as_deref().unwrap_or(&config.ui.color.theme);
    let logger = Logger::new(theme, &config.log);

    if run_sort(&args.source, &args.destination, &config.copy, &logger)
        .await?
        .is_none()
    {
        std::process::exit(1);
    }

    Ok(())
}
