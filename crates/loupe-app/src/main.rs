use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use loupe_config::Config;
use loupe_core::types::TextSource;
use loupe_db::Catalogue;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod events;
pub mod io;
pub mod state;


use self::events::event_loop;
use self::state::AppState;

/// Matching core of the item-scanner overlay. Reads OCR text blocks and
/// emits one structured item record per block as JSON on stdout.
#[derive(Parser)]
#[command(name = "loupe")]
struct Args {
    /// Directory holding the item and stat catalogues
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Item catalogue path; absolute paths ignore the data directory
    #[arg(long)]
    items: Option<PathBuf>,

    /// Stat catalogue path; absolute paths ignore the data directory
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Parse a single OCR dump from a file and exit
    #[arg(long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    // Overrides are written into the config so a later `:reload` resolves
    // the exact files this run started with.
    let mut config = Config::new();
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }
    if let Some(items) = args.items {
        config.data.items_file = items;
    }
    if let Some(stats) = args.stats {
        config.data.stats_file = stats;
    }

    let items_path = config.data.items_path();
    let stats_path = config.data.stats_path();

    let catalogue = Catalogue::load(&items_path, &stats_path).inspect_err(|err| {
        tracing::error!(%err, "failed to load catalogues");
    })?;

    if let Some(path) = args.input {
        return parse_once(&path, &catalogue);
    }

    let input_capacity = config.input_capacity;
    let state = Arc::new(AppState::new(config, catalogue));

    let (input_tx, input_rx) = kanal::bounded_async(input_capacity);
    let (output_tx, output_rx) = kanal::bounded_async(64);

    let watcher = tokio::spawn(log_exit("stdin watcher", io::watch_stdin(input_tx)));
    tokio::spawn(log_exit(
        "event loop",
        event_loop(Arc::clone(&state), input_rx, output_tx),
    ));
    let mut writer = tokio::spawn(io::write_output(output_rx));

    tokio::select! {
        _ = signal::ctrl_c() => {
            // Aborting the watcher closes the input channel; the event
            // loop then finishes its queue and the writer flushes every
            // record before the final await below returns.
            tracing::info!("shutdown requested, draining queued records");
            watcher.abort();
        }
        result = &mut writer => {
            tracing::info!("input closed, exiting");
            log_writer_exit(result);
            return Ok(());
        }
    }

    log_writer_exit(writer.await);
    Ok(())
}

/// One-shot mode for the capture pipeline: parse a saved OCR dump,
/// pretty-print the record, exit non-zero if the item is unknown.
fn parse_once(path: &Path, catalogue: &Catalogue) -> anyhow::Result<()> {
    tracing::debug!(?path, source = ?TextSource::Ocr, "parsing single capture");

    let text = std::fs::read_to_string(path)?;
    let item = loupe_core::assemble(&text, catalogue)?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}

async fn log_exit(task: &'static str, future: impl Future<Output = anyhow::Result<()>>) {
    match future.await {
        Ok(()) => tracing::debug!("{task} finished"),
        Err(err) => tracing::error!("{task} exited: {err}"),
    }
}

fn log_writer_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::error!("output writer exited: {err}"),
        Err(err) => tracing::error!("output writer panicked: {err}"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr; stdout carries only the emitted records.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}
