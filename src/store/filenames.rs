//! Mapping between ticker symbols and on-disk signal filenames.
//!
//! Symbols like `^KS11` or `USDKRW=X` contain characters that are unsafe in
//! filenames, so files are named after a sanitized stem and a fixed remap
//! table restores the canonical symbol when scanning the directory.

/// Filesystem-safe stem for a symbol: `^` and `=` removed, `/` replaced
/// with `_`
pub fn safe_stem(symbol: &str) -> String {
    symbol.replace('^', "").replace('=', "").replace('/', "_")
}

/// `signals_<stem>.json`
pub fn plain_filename(symbol: &str) -> String {
    format!("signals_{}.json", safe_stem(symbol))
}

/// `signals_<stem>.json.gz`
pub fn compressed_filename(symbol: &str) -> String {
    format!("signals_{}.json.gz", safe_stem(symbol))
}

/// Stems whose sanitization is not invertible, mapped back to the canonical
/// symbol. Stems not listed here are already canonical.
const SYMBOL_REMAP: &[(&str, &str)] = &[
    ("KS11", "^KS11"),
    ("IXIC", "^IXIC"),
    ("GSPC", "^GSPC"),
    ("DJI", "^DJI"),
    ("FTSE", "^FTSE"),
    ("GDAXI", "^GDAXI"),
    ("FCHI", "^FCHI"),
    ("N225", "^N225"),
    ("HSI", "^HSI"),
    ("AXJO", "^AXJO"),
    ("GCF", "GC=F"),
    ("SIF", "SI=F"),
    ("CLF", "CL=F"),
    ("NGF", "NG=F"),
    ("ZCF", "ZC=F"),
    ("ZSF", "ZS=F"),
    ("USDKRWX", "USDKRW=X"),
    ("EURUSDX", "EURUSD=X"),
    ("GBPUSDX", "GBPUSD=X"),
    ("USDJPYX", "USDJPY=X"),
    ("005930KS", "005930.KS"),
];

/// Canonical symbol for a filename stem
pub fn canonical_symbol(stem: &str) -> String {
    SYMBOL_REMAP
        .iter()
        .find(|(s, _)| *s == stem)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| stem.to_string())
}

/// Canonical symbol for a directory entry, or `None` if the filename is not
/// a signal file
pub fn symbol_from_filename(filename: &str) -> Option<String> {
    let stem = filename.strip_prefix("signals_")?;
    let stem = stem
        .strip_suffix(".json.gz")
        .or_else(|| stem.strip_suffix(".json"))?;
    Some(canonical_symbol(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_unsafe_characters() {
        assert_eq!(safe_stem("AAPL"), "AAPL");
        assert_eq!(safe_stem("^KS11"), "KS11");
        assert_eq!(safe_stem("USDKRW=X"), "USDKRWX");
        assert_eq!(safe_stem("A/B"), "A_B");
    }

    #[test]
    fn filenames_for_plain_and_compressed() {
        assert_eq!(plain_filename("AAPL"), "signals_AAPL.json");
        assert_eq!(compressed_filename("^KS11"), "signals_KS11.json.gz");
    }

    #[test]
    fn remap_restores_special_characters() {
        assert_eq!(canonical_symbol("KS11"), "^KS11");
        assert_eq!(canonical_symbol("USDKRWX"), "USDKRW=X");
        assert_eq!(canonical_symbol("005930KS"), "005930.KS");
        // Unlisted stems are already canonical
        assert_eq!(canonical_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn symbol_extraction_handles_both_variants() {
        assert_eq!(symbol_from_filename("signals_AAPL.json").as_deref(), Some("AAPL"));
        assert_eq!(
            symbol_from_filename("signals_KS11.json.gz").as_deref(),
            Some("^KS11")
        );
        assert_eq!(symbol_from_filename("notes.txt"), None);
        assert_eq!(symbol_from_filename("signals_AAPL.csv"), None);
    }
}
