//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, service construction and
//! progress-bar styling used by every subcommand.

use crate::app::api::BigYearService;
use crate::cli::args::GlobalArgs;
use crate::config::Config;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Set up structured logging on stderr
pub fn setup_logging(global: &GlobalArgs, default_level: &'static str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = global.get_log_level(default_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bigyear={},tower_http={}", log_level, log_level)));

    if global.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> env -> args)
pub fn load_configuration(global: &GlobalArgs) -> anyhow::Result<Config> {
    match &global.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file given, using defaults and environment variables"),
    }

    let mut config = Config::load(global.config_file.as_deref())
        .context("Failed to load configuration")?;
    config.storage.data_dir = Some(resolve_data_dir(global, &config)?);
    config.validate()?;

    Ok(config)
}

/// Data directory precedence: `--data-dir`, then configuration, then the platform default
pub fn resolve_data_dir(global: &GlobalArgs, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &global.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = &config.storage.data_dir {
        return Ok(dir.clone());
    }
    Config::default_data_dir().context("No data directory configured")
}

/// Open the service over the configured snapshot directory
pub fn open_service(config: Config) -> anyhow::Result<BigYearService> {
    if let Some(dir) = &config.storage.data_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        info!("Using data directory: {}", dir.display());
    }
    BigYearService::open(config).context("Failed to restore snapshot")
}

/// eBird exports at `path`: the file itself, or every .csv below a directory
pub fn discover_csv_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut csv_files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();

    // Sort files for consistent import order
    csv_files.sort();
    debug!("Discovered {} CSV files in {}", csv_files.len(), path.display());
    csv_files
}

/// Create a progress bar with the standard styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_csv_files() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("2026");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("b.csv"), "x").unwrap();
        std::fs::write(nested.join("a.CSV"), "x").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let files = discover_csv_files(temp_dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("2026/a.CSV"));

        let single = discover_csv_files(&temp_dir.path().join("b.csv"));
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_discover_csv_files_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(discover_csv_files(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = Config::default().with_data_dir("/from/config");
        let mut global = GlobalArgs::default();
        assert_eq!(
            resolve_data_dir(&global, &config).unwrap(),
            PathBuf::from("/from/config")
        );

        global.data_dir = Some(PathBuf::from("/from/flag"));
        assert_eq!(
            resolve_data_dir(&global, &config).unwrap(),
            PathBuf::from("/from/flag")
        );
    }
}
