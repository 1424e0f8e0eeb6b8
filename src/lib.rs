//! Signal-data access layer for a financial chart viewer: per-symbol JSON
//! signal files (plain or gzip), reshaped into column-oriented bundles and
//! cached in memory.

pub mod config;
pub mod models;
pub mod store;

pub use config::Config;
pub use store::SignalStore;
