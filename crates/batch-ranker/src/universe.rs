/// Ticker universe for a batch run.
#[derive(Debug, Clone)]
pub enum StockUniverse {
    Custom(Vec<String>),
    /// The built-in daily-picks list: large caps across tech, finance,
    /// consumer, healthcare, industrial, energy and media.
    Popular,
}

impl StockUniverse {
    pub fn symbols(&self) -> Vec<String> {
        match self {
            StockUniverse::Custom(symbols) => symbols.clone(),
            StockUniverse::Popular => vec![
                "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "NFLX", "JPM", "BAC",
                "WFC", "GS", "MS", "V", "MA", "WMT", "HD", "MCD", "SBUX", "NKE", "DIS", "JNJ",
                "PFE", "UNH", "ABBV", "MRK", "TMO", "BA", "CAT", "GE", "HON", "MMM", "XOM", "CVX",
                "COP", "VZ", "T", "CMCSA", "TGT", "COST", "LOW", "AMD", "INTC", "AVGO", "QCOM",
                "ORCL", "CRM", "ADBE", "NOW", "PYPL",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popular_universe_fits_the_batch_cap() {
        let symbols = StockUniverse::Popular.symbols();
        assert!(!symbols.is_empty());
        assert!(symbols.len() <= 50);
    }
}
