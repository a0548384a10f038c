use crate::banded_tally;
use scoring_core::{Category, CategoryScore, FundamentalMetrics, Indicator};

// Indicator weights sum to the fundamental scale max (40).
const REVENUE_GROWTH_WEIGHT: f64 = 15.0;
const EPS_GROWTH_WEIGHT: f64 = 10.0;
const ROE_WEIGHT: f64 = 8.0;
const FCF_MARGIN_WEIGHT: f64 = 7.0;

/// Scores growth, profitability and cash generation out of 40.
pub struct FundamentalScorer;

impl FundamentalScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, metrics: &FundamentalMetrics) -> CategoryScore {
        banded_tally(
            Category::Fundamental,
            &[
                (
                    Indicator::RevenueGrowth,
                    metrics.revenue_growth_yoy,
                    REVENUE_GROWTH_WEIGHT,
                ),
                (Indicator::EpsGrowth, metrics.eps_growth, EPS_GROWTH_WEIGHT),
                (Indicator::ReturnOnEquity, metrics.roe, ROE_WEIGHT),
                (Indicator::FcfMargin, metrics.fcf_margin, FCF_MARGIN_WEIGHT),
            ],
        )
    }
}

impl Default for FundamentalScorer {
    fn default() -> Self {
        Self::new()
    }
}
