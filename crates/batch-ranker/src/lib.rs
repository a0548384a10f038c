pub mod universe;
pub mod views;

pub use universe::StockUniverse;
pub use views::{ScreenerReport, ScreenerRow};

use chrono::Utc;
use composite_engine::{AggregationMode, StockAnalyzer};
use dashmap::DashMap;
use scoring_core::{CompositeResult, EngineError, MetricResolver, TickerSnapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout, timeout_at};

const CACHE_TTL_SECS: u64 = 300;
const MAX_SYMBOL_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Result rows kept after ranking.
    pub top_n: usize,
    /// Hard cap on tickers per request.
    pub max_tickers: usize,
    /// Concurrent resolver calls in flight.
    pub concurrency: usize,
    /// Budget for resolving one ticker.
    pub ticker_timeout: Duration,
    /// Budget for the whole batch. Expiry marks the result partial rather
    /// than failing it.
    pub batch_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            max_tickers: 50,
            concurrency: 8,
            ticker_timeout: Duration::from_secs(10),
            batch_timeout: Duration::from_secs(45),
        }
    }
}

struct CacheEntry {
    snapshot: TickerSnapshot,
    cached_at: Instant,
}

/// Canonical batch response: ranked composite results plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub generated_at: String,
    /// Count of the full validated input, including tickers that failed to
    /// resolve. Callers can tell "scored 3 of 10" from "scored 3 of 3".
    pub total_analyzed: usize,
    pub partial: bool,
    pub results: Vec<CompositeResult>,
}

/// Scores a list of tickers concurrently and ranks them by composite score.
///
/// Resolution is the only I/O and runs in spawned tasks behind a semaphore;
/// scoring itself is pure and happens as results are gathered. A failed
/// ticker is logged and skipped, never failing the batch.
pub struct BatchRanker {
    resolver: Arc<dyn MetricResolver>,
    analyzer: StockAnalyzer,
    config: BatchConfig,
    snapshot_cache: Arc<DashMap<String, CacheEntry>>,
}

impl BatchRanker {
    pub fn new(resolver: Arc<dyn MetricResolver>) -> Self {
        Self::with_config(resolver, BatchConfig::default())
    }

    pub fn with_config(resolver: Arc<dyn MetricResolver>, config: BatchConfig) -> Self {
        Self {
            resolver,
            analyzer: StockAnalyzer::new(),
            config,
            snapshot_cache: Arc::new(DashMap::new()),
        }
    }

    /// Screen the given tickers, returning up to `top_n` ranked results
    /// (falls back to the configured default when `None`).
    pub async fn screen(
        &self,
        tickers: &[String],
        top_n: Option<usize>,
    ) -> Result<BatchResult, EngineError> {
        let (pairs, partial, total_analyzed) = self.run(tickers, top_n).await?;
        Ok(BatchResult {
            generated_at: Utc::now().to_rfc3339(),
            total_analyzed,
            partial,
            results: pairs.into_iter().map(|(composite, _)| composite).collect(),
        })
    }

    /// Screener-surface variant of [`screen`](Self::screen): same ranking,
    /// projected onto the 30-point display scale with key metrics attached.
    pub async fn screen_report(
        &self,
        tickers: &[String],
        top_n: Option<usize>,
    ) -> Result<ScreenerReport, EngineError> {
        let (pairs, partial, total_analyzed) = self.run(tickers, top_n).await?;
        let now = Utc::now();
        Ok(ScreenerReport {
            date: now.format("%Y-%m-%d").to_string(),
            generated_at: now.to_rfc3339(),
            total_analyzed,
            partial,
            results: pairs
                .iter()
                .map(|(composite, snapshot)| ScreenerRow::build(composite, snapshot))
                .collect(),
        })
    }

    /// Rank the built-in popular universe for the daily-picks view.
    pub async fn daily_picks(&self) -> Result<ScreenerReport, EngineError> {
        self.screen_report(&StockUniverse::Popular.symbols(), None)
            .await
    }

    async fn run(
        &self,
        tickers: &[String],
        top_n: Option<usize>,
    ) -> Result<(Vec<(CompositeResult, TickerSnapshot)>, bool, usize), EngineError> {
        let symbols = self.validate(tickers)?;
        let total_analyzed = symbols.len();
        tracing::info!("Screening {} tickers", total_analyzed);

        let deadline = tokio::time::Instant::now() + self.config.batch_timeout;
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut tasks: JoinSet<(String, Result<TickerSnapshot, EngineError>)> = JoinSet::new();

        for symbol in symbols.iter().cloned() {
            let resolver = Arc::clone(&self.resolver);
            let cache = Arc::clone(&self.snapshot_cache);
            let semaphore = Arc::clone(&semaphore);
            let ticker_timeout = self.config.ticker_timeout;
            tasks.spawn(async move {
                if let Some(entry) = cache.get(&symbol) {
                    if entry.cached_at.elapsed().as_secs() < CACHE_TTL_SECS {
                        let snapshot = entry.snapshot.clone();
                        drop(entry);
                        return (symbol, Ok(snapshot));
                    }
                }

                let permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        let err = EngineError::TickerResolutionFailed {
                            ticker: symbol.clone(),
                            reason: "batch was shut down".to_string(),
                        };
                        return (symbol, Err(err));
                    }
                };

                let outcome = match timeout(ticker_timeout, resolver.resolve(&symbol)).await {
                    Ok(Ok(snapshot)) => {
                        cache.insert(
                            symbol.clone(),
                            CacheEntry {
                                snapshot: snapshot.clone(),
                                cached_at: Instant::now(),
                            },
                        );
                        Ok(snapshot)
                    }
                    Ok(Err(err)) => Err(err),
                    Err(_) => Err(EngineError::TickerResolutionFailed {
                        ticker: symbol.clone(),
                        reason: "resolution timed out".to_string(),
                    }),
                };
                drop(permit);
                (symbol, outcome)
            });
        }

        let mut pairs: Vec<(CompositeResult, TickerSnapshot)> = Vec::new();
        let mut partial = false;
        loop {
            let joined = match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(joined)) => joined,
                Ok(None) => break,
                Err(_) => {
                    partial = true;
                    let remaining = total_analyzed - pairs.len();
                    tracing::warn!(
                        "Batch deadline expired with up to {} tickers unscored",
                        remaining
                    );
                    tasks.abort_all();
                    break;
                }
            };
            match joined {
                Ok((_, Ok(snapshot))) => {
                    let composite = self
                        .analyzer
                        .composite(&snapshot, AggregationMode::Screener);
                    pairs.push((composite, snapshot));
                }
                Ok((symbol, Err(err))) => {
                    tracing::warn!("Skipping {}: {}", symbol, err);
                }
                Err(join_err) => {
                    tracing::warn!("Resolution task failed: {}", join_err);
                }
            }
        }

        if pairs.is_empty() && !partial {
            return Err(EngineError::TickerResolutionFailed {
                ticker: symbols.join(", "),
                reason: "no tickers could be resolved".to_string(),
            });
        }

        pairs.sort_by(|a, b| {
            b.0.total_score
                .partial_cmp(&a.0.total_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.ticker.cmp(&b.0.ticker))
        });
        pairs.truncate(top_n.unwrap_or(self.config.top_n));

        tracing::info!(
            "Screened {} tickers, returning top {}{}",
            total_analyzed,
            pairs.len(),
            if partial { " (partial)" } else { "" }
        );
        Ok((pairs, partial, total_analyzed))
    }

    /// Normalizes symbols (trim, uppercase) and rejects malformed input
    /// before any resolver work starts.
    fn validate(&self, tickers: &[String]) -> Result<Vec<String>, EngineError> {
        if tickers.is_empty() {
            return Err(EngineError::InvalidInput("ticker list is empty".to_string()));
        }
        if tickers.len() > self.config.max_tickers {
            return Err(EngineError::InvalidInput(format!(
                "too many tickers: {} (limit {})",
                tickers.len(),
                self.config.max_tickers
            )));
        }

        let mut symbols = Vec::with_capacity(tickers.len());
        for raw in tickers {
            let symbol = raw.trim().to_uppercase();
            let well_formed = !symbol.is_empty()
                && symbol.len() <= MAX_SYMBOL_LEN
                && symbol.chars().all(|c| {
                    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-' || c == '_'
                });
            if !well_formed {
                return Err(EngineError::InvalidInput(format!(
                    "malformed ticker symbol: {:?}",
                    raw
                )));
            }
            symbols.push(symbol);
        }
        Ok(symbols)
    }
}
