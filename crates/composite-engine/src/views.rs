use scoring_core::{
    round2, Category, CategoryScore, FundamentalMetrics, Recommendation, RiskMetrics,
    TechnicalMetrics, ValuationMetrics,
};
use serde::{Deserialize, Serialize};

/// Per-category score breakdown on the 100-point analysis surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub fundamentals_score: f64,
    pub valuation_score: f64,
    pub technicals_score: f64,
    pub risk_score: f64,
    pub total_score: f64,
    pub max_score: f64,
}

impl ScoringBreakdown {
    pub fn from_scores(scores: &[CategoryScore], total_score: f64, max_score: f64) -> Self {
        let value_of = |category: Category| {
            scores
                .iter()
                .find(|s| s.category == category)
                .map(|s| round2(s.value))
                .unwrap_or(0.0)
        };
        Self {
            fundamentals_score: value_of(Category::Fundamental),
            valuation_score: value_of(Category::Valuation),
            technicals_score: value_of(Category::Technical),
            risk_score: value_of(Category::Risk),
            total_score: round2(total_score),
            max_score,
        }
    }
}

/// Complete single-ticker response consumed by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub ticker: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub fundamentals: FundamentalMetrics,
    pub valuation: ValuationMetrics,
    pub technicals: TechnicalMetrics,
    pub risk: RiskMetrics,
    pub scoring: ScoringBreakdown,
    pub recommendation: Recommendation,
    pub insights: Vec<String>,
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::{Action, Category};

    #[test]
    fn breakdown_picks_categories_by_name() {
        let scores: Vec<CategoryScore> = Category::ALL
            .iter()
            .map(|&category| CategoryScore {
                category,
                value: category.scale_max() / 2.0,
                scale_max: category.scale_max(),
                contributing: vec![],
                detracting: vec![],
            })
            .collect();
        let breakdown = ScoringBreakdown::from_scores(&scores, 50.0, 100.0);
        assert_eq!(breakdown.fundamentals_score, 20.0);
        assert_eq!(breakdown.valuation_score, 15.0);
        assert_eq!(breakdown.technicals_score, 10.0);
        assert_eq!(breakdown.risk_score, 5.0);
        assert_eq!(breakdown.total_score, 50.0);
    }

    #[test]
    fn analysis_serializes_nulls_not_zeros() {
        let analysis = StockAnalysis {
            ticker: "AAPL".to_string(),
            company_name: None,
            sector: None,
            industry: None,
            fundamentals: FundamentalMetrics::default(),
            valuation: ValuationMetrics::default(),
            technicals: TechnicalMetrics::default(),
            risk: RiskMetrics::default(),
            scoring: ScoringBreakdown {
                fundamentals_score: 20.0,
                valuation_score: 15.0,
                technicals_score: 10.0,
                risk_score: 5.0,
                total_score: 50.0,
                max_score: 100.0,
            },
            recommendation: Recommendation {
                action: Action::Hold,
                score: 50.0,
                confidence: 50.0,
                reasoning: vec![],
            },
            insights: vec![],
            last_updated: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json["fundamentals"]["pe_ratio"].is_null());
        assert_eq!(json["recommendation"]["action"], "Hold");

        let back: StockAnalysis = serde_json::from_value(json).unwrap();
        assert!(back.fundamentals.pe_ratio.is_none());
    }
}
