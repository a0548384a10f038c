use scoring_core::{Category, CategoryScore};

/// Canonical total scale: every aggregation mode lands on 0-100.
pub const TOTAL_SCALE_MAX: f64 = 100.0;

/// Declares which scale-reconciliation rule applies for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// The single-stock analysis view: category scales (40/30/20/10) are
    /// directly additive, so the total is a plain sum.
    Analysis,
    /// The screener/daily-picks view: each category score is normalized by
    /// its own scale and blended under the declared 40%/40%/20% split
    /// (fundamentals/technicals/risk; valuation carries no screener weight).
    Screener,
}

impl AggregationMode {
    /// Declared weight of a category under this mode, in points of the
    /// canonical 100-point total.
    pub fn weight(&self, category: Category) -> f64 {
        match self {
            AggregationMode::Analysis => category.scale_max(),
            AggregationMode::Screener => match category {
                Category::Fundamental => 40.0,
                Category::Valuation => 0.0,
                Category::Technical => 40.0,
                Category::Risk => 20.0,
            },
        }
    }
}

/// Combine category scores into one total on the canonical 0-100 scale.
///
/// Summation always walks categories in declaration order, so the same
/// `CategoryScore` set reproduces the same IEEE-754 total bit-for-bit.
pub fn aggregate(scores: &[CategoryScore], mode: AggregationMode) -> f64 {
    let mut total = 0.0;
    for category in Category::ALL {
        let Some(score) = scores.iter().find(|s| s.category == category) else {
            continue;
        };
        match mode {
            AggregationMode::Analysis => total += score.value,
            AggregationMode::Screener => total += score.normalized() * mode.weight(category),
        }
    }
    total
}
