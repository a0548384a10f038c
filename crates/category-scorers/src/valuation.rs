use crate::banded_tally;
use scoring_core::{
    Category, CategoryScore, FundamentalMetrics, Indicator, ValuationMetrics, ValueLabel,
};

const FAIR_VALUE_WEIGHT: f64 = 20.0;
const PE_HISTORICAL_WEIGHT: f64 = 5.0;
const PE_INDUSTRY_WEIGHT: f64 = 5.0;

// Growth-adjusted P/E is capped when deriving fair value from earnings.
const MAX_ADJUSTED_PE: f64 = 30.0;

/// Scores price relative to estimated fair value and peer/historical P/E,
/// out of 30.
pub struct ValuationScorer;

impl ValuationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Fill in derivable valuation fields the resolver left empty.
    ///
    /// Fair value uses the earnings-based estimate with growth adjustment:
    /// implied EPS times the trailing P/E scaled by quarterly earnings
    /// growth, capped at 30x. Comparison labels derive from the current P/E
    /// against the historical/industry average with 0.8 / 1.2 cutoffs.
    pub fn complete(
        &self,
        fundamentals: &FundamentalMetrics,
        valuation: &ValuationMetrics,
        current_price: Option<f64>,
    ) -> ValuationMetrics {
        let mut v = valuation.clone();
        v.current_price = v.current_price.or(current_price);

        if v.fair_value_estimate.is_none() {
            if let (Some(price), Some(pe)) = (v.current_price, fundamentals.pe_ratio) {
                if price > 0.0 && pe > 0.0 {
                    let eps = price / pe;
                    let growth = fundamentals.eps_growth.unwrap_or(0.0) / 100.0;
                    let adjusted_pe = (pe * (1.0 + growth)).min(MAX_ADJUSTED_PE);
                    if adjusted_pe > 0.0 {
                        v.fair_value_estimate = Some(eps * adjusted_pe);
                        v.valuation_method =
                            Some("Earnings-based with growth adjustment".to_string());
                    }
                }
            }
        }

        if v.price_to_fair_value.is_none() {
            if let (Some(price), Some(fair)) = (v.current_price, v.fair_value_estimate) {
                if fair > 0.0 {
                    v.price_to_fair_value = Some(price / fair);
                }
            }
        }

        if v.price_vs_historical.is_none() {
            v.price_vs_historical = pe_label(fundamentals.pe_ratio, v.historical_pe_avg);
        }
        if v.price_vs_industry.is_none() {
            v.price_vs_industry = pe_label(fundamentals.pe_ratio, v.industry_pe_avg);
        }

        v
    }

    /// Expects a [`complete`](Self::complete)d metrics block.
    pub fn score(
        &self,
        fundamentals: &FundamentalMetrics,
        valuation: &ValuationMetrics,
    ) -> CategoryScore {
        banded_tally(
            Category::Valuation,
            &[
                (
                    Indicator::PriceToFairValue,
                    valuation.price_to_fair_value,
                    FAIR_VALUE_WEIGHT,
                ),
                (
                    Indicator::PeVsHistorical,
                    pe_ratio_vs(fundamentals.pe_ratio, valuation.historical_pe_avg),
                    PE_HISTORICAL_WEIGHT,
                ),
                (
                    Indicator::PeVsIndustry,
                    pe_ratio_vs(fundamentals.pe_ratio, valuation.industry_pe_avg),
                    PE_INDUSTRY_WEIGHT,
                ),
            ],
        )
    }
}

impl Default for ValuationScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn pe_ratio_vs(pe: Option<f64>, reference: Option<f64>) -> Option<f64> {
    match (pe, reference) {
        (Some(pe), Some(reference)) if pe > 0.0 && reference > 0.0 => Some(pe / reference),
        _ => None,
    }
}

fn pe_label(pe: Option<f64>, reference: Option<f64>) -> Option<ValueLabel> {
    let ratio = pe_ratio_vs(pe, reference)?;
    Some(if ratio > 1.2 {
        ValueLabel::Overvalued
    } else if ratio < 0.8 {
        ValueLabel::Undervalued
    } else {
        ValueLabel::Fair
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_fair_value_from_earnings_and_growth() {
        let scorer = ValuationScorer::new();
        let fundamentals = FundamentalMetrics {
            pe_ratio: Some(20.0),
            eps_growth: Some(10.0),
            ..Default::default()
        };
        let v = scorer.complete(&fundamentals, &ValuationMetrics::default(), Some(100.0));

        // EPS 5.0, adjusted P/E 22 -> fair value 110, price/fair ~0.909
        let fair = v.fair_value_estimate.unwrap();
        assert!((fair - 110.0).abs() < 1e-9);
        let ptfv = v.price_to_fair_value.unwrap();
        assert!((ptfv - 100.0 / 110.0).abs() < 1e-9);
        assert!(v.valuation_method.is_some());
    }

    #[test]
    fn adjusted_pe_is_capped() {
        let scorer = ValuationScorer::new();
        let fundamentals = FundamentalMetrics {
            pe_ratio: Some(45.0),
            eps_growth: Some(80.0),
            ..Default::default()
        };
        let v = scorer.complete(&fundamentals, &ValuationMetrics::default(), Some(90.0));
        // EPS 2.0, adjusted P/E capped at 30 -> fair value 60
        assert!((v.fair_value_estimate.unwrap() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn labels_derive_from_pe_comparison() {
        let scorer = ValuationScorer::new();
        let fundamentals = FundamentalMetrics {
            pe_ratio: Some(30.0),
            ..Default::default()
        };
        let base = ValuationMetrics {
            historical_pe_avg: Some(20.0),
            industry_pe_avg: Some(28.0),
            ..Default::default()
        };
        let v = scorer.complete(&fundamentals, &base, None);
        assert_eq!(v.price_vs_historical, Some(ValueLabel::Overvalued));
        assert_eq!(v.price_vs_industry, Some(ValueLabel::Fair));
    }

    #[test]
    fn undervalued_scores_above_overvalued() {
        let scorer = ValuationScorer::new();
        let fundamentals = FundamentalMetrics::default();

        let cheap = ValuationMetrics {
            price_to_fair_value: Some(0.75),
            ..Default::default()
        };
        let rich = ValuationMetrics {
            price_to_fair_value: Some(1.4),
            ..Default::default()
        };
        let cheap_score = scorer.score(&fundamentals, &cheap);
        let rich_score = scorer.score(&fundamentals, &rich);
        assert!(cheap_score.value > rich_score.value);
        assert_eq!(rich_score.value, 0.0);
        assert_eq!(rich_score.detracting.len(), 1);
    }

    #[test]
    fn supplied_fields_are_not_overwritten() {
        let scorer = ValuationScorer::new();
        let fundamentals = FundamentalMetrics {
            pe_ratio: Some(20.0),
            ..Default::default()
        };
        let supplied = ValuationMetrics {
            fair_value_estimate: Some(250.0),
            valuation_method: Some("DCF".to_string()),
            ..Default::default()
        };
        let v = scorer.complete(&fundamentals, &supplied, Some(200.0));
        assert_eq!(v.fair_value_estimate, Some(250.0));
        assert_eq!(v.valuation_method.as_deref(), Some("DCF"));
        assert!((v.price_to_fair_value.unwrap() - 0.8).abs() < 1e-9);
    }
}
