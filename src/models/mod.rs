pub mod bundle;
pub mod record;
pub mod stats;

pub use bundle::{IndicatorColumns, PriceColumns, SignalBundle, SignalColumns};
pub use record::{SignalRecord, SymbolSeries};
pub use stats::{CacheStats, CompressionReport, DataInfo};
