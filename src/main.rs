use std::env;
use std::process;

use anyhow::{bail, Result};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invest_signal::config::Config;
use invest_signal::store::SignalStore;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invest_signal=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let mut store = SignalStore::new(&config.data_dir);

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("symbols") => {
            for symbol in store.available_symbols() {
                println!("{}", symbol);
            }
        }
        Some("info") => {
            let info = store.data_info();
            println!("Symbols: {}", info.symbols.len());
            println!("Estimated records: ~{}", info.total_records);
            println!("Last updated: {}", info.last_updated);
        }
        Some("show") => {
            let symbol = match args.get(2) {
                Some(symbol) => symbol,
                None => bail!("Usage: invest-signal show <SYMBOL> [PERIOD]"),
            };
            let period = args
                .get(3)
                .map(String::as_str)
                .unwrap_or(config.default_period.as_str());

            let bundle = store.signals_for(symbol, period);
            println!("{}", serde_json::to_string_pretty(&bundle)?);
            debug!("Cache stats after show: {:?}", store.cache_stats());
        }
        Some("compress") => {
            let report = store.compress_uncompressed();
            println!(
                "Compressed {} files, saved {} bytes ({} MB, {:.1}% average)",
                report.files_compressed,
                report.bytes_saved,
                report.mb_saved,
                report.avg_savings_percent
            );
        }
        _ => {
            eprintln!("Usage: invest-signal <symbols|info|show|compress>");
            eprintln!();
            eprintln!("  symbols                 List symbols with signal data");
            eprintln!("  info                    Data directory summary");
            eprintln!("  show <SYMBOL> [PERIOD]  Print a symbol's signal bundle as JSON");
            eprintln!("  compress                Gzip plain signal files in place");
            process::exit(2);
        }
    }

    Ok(())
}
