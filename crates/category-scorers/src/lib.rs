pub mod fundamental;
pub mod risk;
pub mod technical;
pub mod valuation;

pub use fundamental::FundamentalScorer;
pub use risk::RiskScorer;
pub use technical::TechnicalScorer;
pub use valuation::ValuationScorer;

use scoring_core::{band, threshold, Band, Category, CategoryScore, Indicator, Reason};

/// Weighted-band tally shared by scorers whose indicators all come straight
/// from the threshold table.
///
/// Each row is `(indicator, raw value, weight)`. Good earns the full weight,
/// ok half, poor nothing. Unknown values drop out of both the numerator and
/// the denominator: the score is renormalized over the weight that was
/// actually present, so missing data never reads as a zero. A category with
/// no resolvable indicator at all scores neutral (half its scale).
pub(crate) fn banded_tally(
    category: Category,
    rows: &[(Indicator, Option<f64>, f64)],
) -> CategoryScore {
    let scale_max = category.scale_max();
    let mut earned = 0.0;
    let mut present_weight = 0.0;
    let mut contributing = Vec::new();
    let mut detracting = Vec::new();

    for &(indicator, value, weight) in rows {
        let Some(b) = band(value, threshold(indicator)) else {
            continue;
        };
        present_weight += weight;
        earned += weight * b.weight_fraction();
        match b {
            Band::Good => contributing.push(Reason::contributing(indicator, value)),
            Band::Poor => detracting.push(Reason::detracting(indicator, value)),
            Band::Ok => {}
        }
    }

    let value = if present_weight > 0.0 {
        (earned / present_weight) * scale_max
    } else {
        scale_max / 2.0
    };

    CategoryScore {
        category,
        value: value.clamp(0.0, scale_max),
        scale_max,
        contributing,
        detracting,
    }
}
