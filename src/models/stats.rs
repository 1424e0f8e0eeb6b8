use serde::Serialize;

/// Cache usage counters and derived hit rate
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Bundle requests served since the last cache clear
    pub total_requests: u64,

    /// Requests satisfied by either cache tier
    pub cache_hits: u64,

    /// Requests that reached the disk-probe path
    pub cache_misses: u64,

    /// `cache_hits / total_requests * 100`, rounded to 2 decimal places;
    /// 0 when no requests have been made yet
    pub hit_rate: f64,

    /// Symbols currently held in the raw series cache
    pub cached_symbols: usize,

    /// Reshaped bundles currently held in the bundle cache
    pub cached_bundles: usize,
}

/// Summary of the signal data directory
#[derive(Debug, Clone, Serialize)]
pub struct DataInfo {
    /// Size-based estimate (~200 bytes per record), not an exact count
    pub total_records: u64,

    /// Symbols with a signal file on disk
    pub symbols: Vec<String>,

    /// Coarse date stamp; per-symbol timestamps live in the bundles
    pub last_updated: String,
}

/// Result of a compression maintenance pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompressionReport {
    pub files_compressed: usize,

    /// Can go negative if gzip grows a tiny file
    pub bytes_saved: i64,

    /// `bytes_saved` in megabytes, rounded to 2 decimal places
    pub mb_saved: f64,

    /// Mean per-file savings percentage, rounded to 1 decimal place
    pub avg_savings_percent: f64,
}
