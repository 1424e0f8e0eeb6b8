pub mod filenames;
pub mod signals;

pub use signals::{LoadError, SignalStore};
