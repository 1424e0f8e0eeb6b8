use serde::{Deserialize, Serialize};

use crate::models::SignalRecord;

/// Column-oriented, chart-ready view of one symbol's series
///
/// Every array has the same length as the source series; index `i` across
/// all arrays refers to the same trading day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalBundle {
    pub symbol: String,

    /// Trading dates, in on-disk order
    pub dates: Vec<String>,

    /// OHLCV price columns
    pub data: PriceColumns,

    /// The six precomputed signal columns
    pub signals: SignalColumns,

    pub indicators: IndicatorColumns,

    /// Reserved for trendline overlays; always empty for now
    pub trendlines: Vec<serde_json::Value>,

    /// Last record's own `last_updated` if present, else its date
    pub last_updated: Option<String>,

    /// Set when the underlying series could not be produced. Callers must
    /// check this rather than relying on array emptiness alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceColumns {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalColumns {
    pub short_signal_v1: Vec<f64>,
    pub short_signal_v2: Vec<f64>,
    pub long_signal: Vec<f64>,
    pub combined_signal_v1: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub momentum_color_signal: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorColumns {
    #[serde(rename = "Final_Composite_Value")]
    pub final_composite_value: Vec<f64>,
}

impl SignalBundle {
    /// Reshape row-oriented records into the parallel column arrays, in
    /// original record order
    pub fn from_records(symbol: &str, records: &[SignalRecord]) -> Self {
        let mut dates = Vec::with_capacity(records.len());
        let mut data = PriceColumns::default();
        let mut signals = SignalColumns::default();
        let mut indicators = IndicatorColumns::default();

        for record in records {
            dates.push(record.date.clone());
            data.open.push(record.open);
            data.high.push(record.high);
            data.low.push(record.low);
            data.close.push(record.close);
            data.volume.push(record.volume);
            signals.short_signal_v1.push(record.short_signal_v1);
            signals.short_signal_v2.push(record.short_signal_v2);
            signals.long_signal.push(record.long_signal);
            signals.combined_signal_v1.push(record.combined_signal_v1);
            signals.macd_signal.push(record.macd_signal);
            signals.momentum_color_signal.push(record.momentum_color_signal);
            indicators.final_composite_value.push(record.fcv);
        }

        let last_updated = records
            .last()
            .map(|r| r.last_updated.clone().unwrap_or_else(|| r.date.clone()));

        Self {
            symbol: symbol.to_string(),
            dates,
            data,
            signals,
            indicators,
            trendlines: Vec::new(),
            last_updated,
            error: None,
        }
    }

    /// All-empty bundle with the error marker set; returned when the series
    /// could not be loaded so callers always get a well-typed result
    pub fn empty_with_error(symbol: &str, message: impl Into<String>) -> Self {
        Self {
            symbol: symbol.to_string(),
            dates: Vec::new(),
            data: PriceColumns::default(),
            signals: SignalColumns::default(),
            indicators: IndicatorColumns::default(),
            trendlines: Vec::new(),
            last_updated: None,
            error: Some(message.into()),
        }
    }

    /// Number of trading days in the bundle
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, close: f64) -> SignalRecord {
        SignalRecord {
            date: date.to_string(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1000.0,
            short_signal_v1: 1.0,
            short_signal_v2: 0.0,
            long_signal: -1.0,
            combined_signal_v1: 0.0,
            macd_signal: 1.0,
            momentum_color_signal: 2.0,
            fcv: 0.5,
            last_updated: None,
        }
    }

    #[test]
    fn all_columns_share_one_length() {
        let records = vec![
            record("2024-01-01", 100.0),
            record("2024-01-02", 101.0),
            record("2024-01-03", 102.0),
        ];
        let bundle = SignalBundle::from_records("AAPL", &records);

        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.data.open.len(), 3);
        assert_eq!(bundle.data.volume.len(), 3);
        assert_eq!(bundle.signals.short_signal_v1.len(), 3);
        assert_eq!(bundle.signals.momentum_color_signal.len(), 3);
        assert_eq!(bundle.indicators.final_composite_value.len(), 3);
        assert!(bundle.trendlines.is_empty());
        assert!(bundle.error.is_none());
    }

    #[test]
    fn columns_preserve_record_order() {
        let records = vec![record("2024-01-01", 100.0), record("2024-01-02", 101.0)];
        let bundle = SignalBundle::from_records("AAPL", &records);

        assert_eq!(bundle.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(bundle.data.close, vec![100.0, 101.0]);
    }

    #[test]
    fn last_updated_prefers_record_field_over_date() {
        let mut records = vec![record("2024-01-01", 100.0), record("2024-01-02", 101.0)];
        let bundle = SignalBundle::from_records("AAPL", &records);
        assert_eq!(bundle.last_updated.as_deref(), Some("2024-01-02"));

        records[1].last_updated = Some("2024-01-05".to_string());
        let bundle = SignalBundle::from_records("AAPL", &records);
        assert_eq!(bundle.last_updated.as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn error_bundle_is_empty_with_marker() {
        let bundle = SignalBundle::empty_with_error("XXXX", "no signal file for symbol XXXX");

        assert!(bundle.is_empty());
        assert!(bundle.data.close.is_empty());
        assert!(bundle.indicators.final_composite_value.is_empty());
        assert_eq!(bundle.last_updated, None);
        assert!(!bundle.error.as_deref().unwrap().is_empty());
    }

    #[test]
    fn indicator_serializes_with_original_column_name() {
        let bundle = SignalBundle::from_records("AAPL", &[record("2024-01-01", 100.0)]);
        let json = serde_json::to_string(&bundle).unwrap();

        assert!(json.contains("\"Final_Composite_Value\""));
        // No error field on a healthy bundle
        assert!(!json.contains("\"error\""));
    }
}
