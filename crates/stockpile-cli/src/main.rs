//! stockpile - an offline-first terminal dashboard for a product inventory API.
//!
//! Every invocation hydrates the inventory (from the local cache when it has
//! data, from the API otherwise), runs one command and exits. The cache
//! carries added, edited and deleted products between invocations.

mod cli;
mod view;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stockpile_core::{
    ApiClient, CacheStore, Config, FileStorage, HydrationSource, ProductApi, SyncController,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command};
use view::{product_detail, product_table, TerminalView};

type Controller = SyncController<ApiClient, FileStorage, TerminalView<io::Stdout>>;

/// Log file name inside the configured log directory
const LOG_FILE: &str = "stockpile.log";

/// Open `stockpile.log` inside `dir`, creating the directory if needed.
fn log_file_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr, and additionally to a file when `log_dir` is set and
/// the file can be opened. The returned guard flushes the file writer and
/// must be held until exit.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let mut appender_error = None;
    let (file_layer, guard) = match log_dir.map(|dir| (dir, log_file_appender(dir))) {
        Some((_, Ok(appender))) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        Some((dir, Err(e))) => {
            appender_error = Some((dir, e));
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    if let Some((dir, e)) = appender_error {
        warn!(dir = %dir.display(), error = %e, "Cannot open log file, logging to stderr only");
    }

    guard
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let (mut config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_env();
    cli.apply(&mut config);

    let _guard = init_tracing(config.log_dir.as_deref());
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    info!(base_url = %config.base_url, "stockpile starting");

    let api = ApiClient::with_timeout(&config.base_url, config.request_timeout())?;
    let cache_dir = config.cache_dir()?;
    let storage = FileStorage::new(cache_dir.clone())
        .with_context(|| format!("Failed to open cache directory: {}", cache_dir.display()))?;

    let mut controller = SyncController::new(api, CacheStore::new(storage), TerminalView::new(io::stdout()))
        .with_list_limit(config.list_limit);

    let ok = run(cli.command, &mut controller).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Run one command. Returns whether it succeeded.
async fn run(command: Command, controller: &mut Controller) -> Result<bool> {
    let report = match command {
        Command::Reset => controller.reload().await.context("Failed to clear product cache")?,
        _ => controller.hydrate().await,
    };
    let loaded = !matches!(report.source, HydrationSource::Failed { .. });
    info!(source = ?report.source, count = report.count, "Inventory ready");

    match command {
        Command::List => {
            if loaded {
                print!("{}", product_table(controller.products()));
                println!("{} products", controller.view().count());
            }
            Ok(loaded)
        }
        Command::Show { id, remote: true } => match controller.api().fetch_one(id).await {
            Ok(product) => {
                print!("{}", product_detail(&product));
                Ok(true)
            }
            Err(e) => {
                println!("[error] Failed to fetch product {}: {}", id, e);
                Ok(false)
            }
        },
        Command::Show { id, remote: false } => match controller.inventory().find(id) {
            Some(product) => {
                print!("{}", product_detail(product));
                Ok(true)
            }
            None => {
                println!("[error] No product with id {}", id);
                Ok(false)
            }
        },
        Command::Add(args) => Ok(controller.add(args.into()).await.is_success()),
        Command::Edit(args) => match controller.begin_edit(args.id) {
            Some(mut edit) => {
                args.apply(&mut edit.draft);
                Ok(controller.submit_edit(edit).await.is_success())
            }
            None => {
                println!("[error] No product with id {}", args.id);
                Ok(false)
            }
        },
        Command::Delete { id } => Ok(controller.delete(id).await.is_success()),
        Command::Reset => {
            if loaded {
                println!("Fetched {} products", report.count);
            }
            Ok(loaded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_appender_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");

        assert!(log_file_appender(&dir).is_ok());
        assert!(dir.join(LOG_FILE).exists());
    }

    #[test]
    fn test_log_file_appender_reports_unusable_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        assert!(log_file_appender(&blocker.join("logs")).is_err());
    }
}
