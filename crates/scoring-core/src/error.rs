use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A single indicator could not be resolved. The indicator drops out of
    /// the weighted sum entirely; it never contributes a zero value.
    #[error("Metric unavailable: {0}")]
    MetricUnavailable(String),

    /// An entire ticker's data was unobtainable. The ticker is excluded from
    /// batch results but still counted in total_analyzed.
    #[error("Failed to resolve {ticker}: {reason}")]
    TickerResolutionFailed { ticker: String, reason: String },

    /// Rejected before any scoring work begins.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The overall batch time budget was exceeded.
    #[error("Batch time budget exceeded")]
    BatchTimeout,
}
