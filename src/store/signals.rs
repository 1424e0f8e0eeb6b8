use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::{CacheStats, CompressionReport, DataInfo, SignalBundle, SymbolSeries};
use crate::store::filenames::{compressed_filename, plain_filename, symbol_from_filename};

/// Assumed average on-disk size of one JSON record, for the record-count
/// estimate in [`SignalStore::data_info`]
const ESTIMATED_BYTES_PER_RECORD: u64 = 200;

/// Why a symbol's series could not be loaded from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no signal file for symbol {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed signal data in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
struct Counters {
    total_requests: u64,
    cache_hits: u64,
    cache_misses: u64,
}

/// File-backed store of per-symbol signal series
///
/// Backed by a directory of `signals_<stem>.json[.gz]` files, with two cache
/// tiers: raw records per symbol, and reshaped bundles per symbol+period.
/// One instance serves one session; methods take `&mut self` and there is no
/// internal locking.
pub struct SignalStore {
    data_dir: PathBuf,
    series_cache: HashMap<String, Arc<SymbolSeries>>,
    bundle_cache: HashMap<String, SignalBundle>,
    symbols: Option<Vec<String>>,
    info: Option<DataInfo>,
    counters: Counters,
}

impl SignalStore {
    /// Create a store over a directory of per-symbol signal files. The
    /// directory is not touched until the first operation needs it.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        info!("Signal store initialized over {}", data_dir.display());

        Self {
            data_dir,
            series_cache: HashMap::new(),
            bundle_cache: HashMap::new(),
            symbols: None,
            info: None,
            counters: Counters::default(),
        }
    }

    /// Symbols with a signal file on disk, sorted ascending, each exactly
    /// once even when both file variants exist. Scanned once and cached for
    /// the store's lifetime; scan failures degrade to an empty list.
    pub fn available_symbols(&mut self) -> Vec<String> {
        if let Some(symbols) = &self.symbols {
            debug!("Symbol inventory served from cache");
            return symbols.clone();
        }

        let symbols = self.scan_symbols();
        self.symbols = Some(symbols.clone());
        symbols
    }

    fn scan_symbols(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    "Failed to scan data directory {}: {}",
                    self.data_dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut symbols = BTreeSet::new();
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(symbol) = symbol_from_filename(name) {
                    symbols.insert(symbol);
                }
            }
        }

        info!(
            "Found {} symbols in {}",
            symbols.len(),
            self.data_dir.display()
        );
        symbols.into_iter().collect()
    }

    /// Directory summary with a size-based record estimate. File contents
    /// are never parsed here; the count is `file_size / 200` per symbol and
    /// is an approximation, not an exact total. Computed once and cached.
    pub fn data_info(&mut self) -> DataInfo {
        if let Some(info) = &self.info {
            debug!("Data info served from cache");
            return info.clone();
        }

        let symbols = self.available_symbols();

        let mut total_records = 0;
        for symbol in &symbols {
            if let Some(size) = self.signal_file_size(symbol) {
                total_records += std::cmp::max(1, size / ESTIMATED_BYTES_PER_RECORD);
            }
        }

        let info = DataInfo {
            total_records,
            symbols,
            last_updated: Utc::now().format("%Y-%m-%d").to_string(),
        };

        info!(
            "Data info computed: {} symbols, ~{} records",
            info.symbols.len(),
            info.total_records
        );
        self.info = Some(info.clone());
        info
    }

    fn signal_file_size(&self, symbol: &str) -> Option<u64> {
        let compressed = self.data_dir.join(compressed_filename(symbol));
        let plain = self.data_dir.join(plain_filename(symbol));

        fs::metadata(compressed)
            .or_else(|_| fs::metadata(plain))
            .ok()
            .map(|m| m.len())
    }

    /// Reshaped signal bundle for one symbol
    ///
    /// The period is part of the cache key but does not filter the series:
    /// every period currently returns the full history, which the chart
    /// front end relies on. An empty or unreadable series yields a bundle
    /// with empty arrays and the `error` marker set; error bundles are not
    /// cached, so retries probe the disk again.
    pub fn signals_for(&mut self, symbol: &str, period: &str) -> SignalBundle {
        self.counters.total_requests += 1;

        let cache_key = format!("{}_{}", symbol, period);
        if let Some(bundle) = self.bundle_cache.get(&cache_key) {
            self.counters.cache_hits += 1;
            debug!("Bundle cache hit: {}", cache_key);
            return bundle.clone();
        }

        let series = match self.load_symbol_series(symbol) {
            Ok(series) => series,
            Err(e) => return SignalBundle::empty_with_error(symbol, e.to_string()),
        };

        if series.is_empty() {
            warn!("Signal file for {} holds no records", symbol);
            return SignalBundle::empty_with_error(
                symbol,
                format!("no signal data for {}", symbol),
            );
        }

        let bundle = SignalBundle::from_records(symbol, &series);
        self.bundle_cache.insert(cache_key, bundle.clone());
        bundle
    }

    /// Cache order: raw per-symbol tier, then disk. Bundle-tier hits never
    /// reach this path, so each request counts exactly one hit or miss.
    fn load_symbol_series(&mut self, symbol: &str) -> Result<Arc<SymbolSeries>, LoadError> {
        if let Some(series) = self.series_cache.get(symbol) {
            self.counters.cache_hits += 1;
            debug!("Series cache hit: {}", symbol);
            return Ok(Arc::clone(series));
        }

        // Counted before the probe so a missing file still registers a miss
        self.counters.cache_misses += 1;

        let series = Arc::new(self.read_series_from_disk(symbol)?);
        self.series_cache.insert(symbol.to_string(), Arc::clone(&series));
        Ok(series)
    }

    fn read_series_from_disk(&self, symbol: &str) -> Result<SymbolSeries, LoadError> {
        let compressed = self.data_dir.join(compressed_filename(symbol));
        let plain = self.data_dir.join(plain_filename(symbol));

        // Compressed variant wins when both exist
        let (path, is_compressed) = if compressed.exists() {
            (compressed, true)
        } else if plain.exists() {
            (plain, false)
        } else {
            warn!("No signal file for symbol {}", symbol);
            return Err(LoadError::NotFound(symbol.to_string()));
        };

        info!("Loading {} from {}", symbol, path.display());

        let mut text = String::new();
        if is_compressed {
            let file = File::open(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            GzDecoder::new(file)
                .read_to_string(&mut text)
                .map_err(|source| {
                    error!("Failed to decompress {}: {}", path.display(), source);
                    LoadError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
        } else {
            text = fs::read_to_string(&path).map_err(|source| {
                error!("Failed to read {}: {}", path.display(), source);
                LoadError::Io {
                    path: path.clone(),
                    source,
                }
            })?;
        }

        serde_json::from_str(&text).map_err(|source| {
            error!("Malformed signal data in {}: {}", path.display(), source);
            LoadError::Json { path, source }
        })
    }

    /// Counter snapshot plus current cache-tier sizes; never changes state
    pub fn cache_stats(&self) -> CacheStats {
        let hit_rate = if self.counters.total_requests > 0 {
            let rate =
                self.counters.cache_hits as f64 / self.counters.total_requests as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        CacheStats {
            total_requests: self.counters.total_requests,
            cache_hits: self.counters.cache_hits,
            cache_misses: self.counters.cache_misses,
            hit_rate,
            cached_symbols: self.series_cache.len(),
            cached_bundles: self.bundle_cache.len(),
        }
    }

    /// Drop both cache tiers and zero the counters. The symbol inventory
    /// and directory summary are kept; they only change when files are
    /// added, not when caches are cleared.
    pub fn clear_cache(&mut self) {
        self.series_cache.clear();
        self.bundle_cache.clear();
        self.counters = Counters::default();
        info!("All caches cleared");
    }

    /// Gzip every plain signal file that has no compressed sibling
    ///
    /// Additive: the plain file is kept, and the presence of the sibling
    /// makes a second run a no-op. Per-file failures are logged and skipped;
    /// the batch never aborts.
    pub fn compress_uncompressed(&mut self) -> CompressionReport {
        let symbols = self.available_symbols();

        let mut report = CompressionReport::default();
        let mut percent_sum = 0.0;

        for symbol in &symbols {
            let plain = self.data_dir.join(plain_filename(symbol));
            let target = self.data_dir.join(compressed_filename(symbol));

            if !plain.exists() || target.exists() {
                continue;
            }

            match compress_file(&plain, &target) {
                Ok((original, compressed)) => {
                    let saved = original as i64 - compressed as i64;
                    let percent = if original > 0 {
                        saved as f64 / original as f64 * 100.0
                    } else {
                        0.0
                    };

                    report.files_compressed += 1;
                    report.bytes_saved += saved;
                    percent_sum += percent;

                    info!(
                        "Compressed {}: {} -> {} bytes ({:.1}% saved)",
                        symbol, original, compressed, percent
                    );
                }
                Err(e) => {
                    error!("Failed to compress {}: {}", symbol, e);
                }
            }
        }

        report.mb_saved =
            (report.bytes_saved as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
        if report.files_compressed > 0 {
            report.avg_savings_percent =
                (percent_sum / report.files_compressed as f64 * 10.0).round() / 10.0;
        }

        info!(
            "Compression pass done: {} files, {} bytes saved",
            report.files_compressed, report.bytes_saved
        );
        report
    }
}

/// Gzip `plain` into `target`, returning (original, compressed) byte sizes
fn compress_file(plain: &Path, target: &Path) -> std::io::Result<(u64, u64)> {
    let bytes = fs::read(plain)?;

    let file = File::create(target)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(&bytes)?;
    encoder.finish()?;

    let compressed = fs::metadata(target)?.len();
    Ok((bytes.len() as u64, compressed))
}
