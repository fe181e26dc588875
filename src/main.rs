//! Cashflow main entry point

use cashflow_api::start_server;
use cashflow_config::Config;
use cashflow_store::MemoryStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "cashflow")]
#[command(version = "0.1.0")]
#[command(about = "A personal finance tracker for accounts and transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = match Config::load(&args.config) {
            Ok(config) => {
                eprintln!(
                    "[INFO] Config loaded from {}: db={}, listen={}:{}",
                    args.config.display(),
                    config.database.name,
                    config.server.host,
                    config.server.port
                );
                config
            }
            Err(e) => {
                eprintln!(
                    "[WARN] Could not load {} ({}), using defaults",
                    args.config.display(),
                    e
                );
                Config::default()
            }
        };

        let store = Arc::new(MemoryStore::new(&config.database.name));
        start_server(config, store).await;
    });

    Ok(())
}
