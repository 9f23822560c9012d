//! Warungbook main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;
use warungbook_api::start_server;
use warungbook_config::{Config, ConfigError};
use warungbook_core::{Book, JsonFileStore, MemoryStore, StoreRef};

#[derive(Parser, Debug)]
#[command(name = "warungbook")]
#[command(author = "Warungbook Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Bookkeeping and accounting reports for a small eatery", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print a default configuration file and exit
    #[arg(long)]
    generate_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.generate_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = match Config::load(args.config.clone()) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            // logger is configured from this file, so report straight to stderr
            eprintln!("{}", e.report());
            return Err(e).with_context(|| format!("Failed to load {}", args.config.display()));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if missing {
        log::warn!(
            target: "warungbook",
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }
    log::info!(
        target: "warungbook",
        "Config loaded: data path={}, entries file={}, persist={}",
        config.data.path.display(),
        config.data.entries_file,
        config.data.persist
    );

    let rt = Runtime::new().context("Failed to start the async runtime")?;
    rt.block_on(async {
        let store: StoreRef = if config.data.persist {
            Arc::new(JsonFileStore::new(config.entries_path()))
        } else {
            log::warn!(target: "warungbook", "Persistence disabled, entries live in memory only");
            Arc::new(MemoryStore::default())
        };

        let book = match Book::open(store.clone()).await {
            Ok(book) => book,
            Err(e) => {
                log::error!(target: "warungbook", "Failed to load entries: {}", e);
                Book::new(store)
            }
        };

        start_server(config, Arc::new(RwLock::new(book)))
            .await
            .context("Server error")
    })
}
