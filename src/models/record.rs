use serde::{Deserialize, Serialize};

/// One trading day of price data and precomputed signals, as stored on disk
///
/// `date` is the only required field; a record without it makes the whole
/// file malformed. Numeric fields absent from the JSON default to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Trading date, `YYYY-MM-DD`
    pub date: String,

    #[serde(default)]
    pub open: f64,

    #[serde(default)]
    pub high: f64,

    #[serde(default)]
    pub low: f64,

    #[serde(default)]
    pub close: f64,

    #[serde(default)]
    pub volume: f64,

    /// Short-horizon signal, first revision
    #[serde(default)]
    pub short_signal_v1: f64,

    /// Short-horizon signal, second revision
    #[serde(default)]
    pub short_signal_v2: f64,

    /// Long-horizon signal
    #[serde(default)]
    pub long_signal: f64,

    /// Combined short/long signal
    #[serde(default)]
    pub combined_signal_v1: f64,

    /// MACD crossover signal
    #[serde(default)]
    pub macd_signal: f64,

    /// Momentum color-coding signal
    #[serde(default)]
    pub momentum_color_signal: f64,

    /// Final composite value indicator
    #[serde(default)]
    pub fcv: f64,

    /// When this record was last regenerated upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Ordered records for one symbol, in on-disk order (assumed chronological,
/// never re-sorted)
pub type SymbolSeries = Vec<SignalRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let record: SignalRecord =
            serde_json::from_str(r#"{"date": "2024-01-02", "close": 101.5}"#).unwrap();

        assert_eq!(record.date, "2024-01-02");
        assert_eq!(record.close, 101.5);
        assert_eq!(record.open, 0.0);
        assert_eq!(record.volume, 0.0);
        assert_eq!(record.macd_signal, 0.0);
        assert_eq!(record.fcv, 0.0);
        assert_eq!(record.last_updated, None);
    }

    #[test]
    fn missing_date_is_malformed() {
        let result = serde_json::from_str::<SignalRecord>(r#"{"close": 101.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn full_record_parses() {
        let json = r#"{
            "date": "2024-01-02",
            "open": 100.0, "high": 102.0, "low": 99.5, "close": 101.5,
            "volume": 1000000,
            "short_signal_v1": 1, "short_signal_v2": -1, "long_signal": 1,
            "combined_signal_v1": 0, "macd_signal": 1, "momentum_color_signal": 2,
            "fcv": 0.73,
            "last_updated": "2024-01-03"
        }"#;

        let record: SignalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.short_signal_v2, -1.0);
        assert_eq!(record.momentum_color_signal, 2.0);
        assert_eq!(record.fcv, 0.73);
        assert_eq!(record.last_updated.as_deref(), Some("2024-01-03"));
    }
}
