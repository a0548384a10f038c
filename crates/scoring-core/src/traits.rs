use crate::{EngineError, TickerSnapshot};
use async_trait::async_trait;

/// Seam for metric acquisition. The engine consumes already-resolved metric
/// values and is agnostic to their source; implementations wrap a market
/// data API, a database, or a fixture set in tests.
#[async_trait]
pub trait MetricResolver: Send + Sync {
    async fn resolve(&self, ticker: &str) -> Result<TickerSnapshot, EngineError>;
}
