pub mod aggregator;
pub mod classifier;
pub mod insights;
pub mod views;

pub use aggregator::{aggregate, AggregationMode, TOTAL_SCALE_MAX};
pub use classifier::{RecommendationClassifier, BUY_BOUNDARY, HOLD_BOUNDARY};
pub use insights::generate_insights;
pub use views::{ScoringBreakdown, StockAnalysis};

use category_scorers::{FundamentalScorer, RiskScorer, TechnicalScorer, ValuationScorer};
use chrono::Utc;
use scoring_core::{
    CategoryScore, CompositeResult, FundamentalMetrics, RiskMetrics, TechnicalMetrics,
    TickerSnapshot, ValuationMetrics,
};

/// Single-ticker scoring pipeline: completes derivable metrics, runs the
/// four category scorers in declaration order, aggregates, and classifies.
pub struct StockAnalyzer {
    fundamental: FundamentalScorer,
    valuation: ValuationScorer,
    technical: TechnicalScorer,
    risk: RiskScorer,
    classifier: RecommendationClassifier,
}

impl StockAnalyzer {
    pub fn new() -> Self {
        Self {
            fundamental: FundamentalScorer::new(),
            valuation: ValuationScorer::new(),
            technical: TechnicalScorer::new(),
            risk: RiskScorer::new(),
            classifier: RecommendationClassifier::new(),
        }
    }

    /// Full analysis-view response for one ticker (100-point additive scale).
    pub fn analyze(&self, snapshot: &TickerSnapshot) -> StockAnalysis {
        let (fundamentals, valuation, technicals, risk) = self.complete_metrics(snapshot);
        let scores = self.score_categories(&fundamentals, &valuation, &technicals, &risk);
        let total = aggregate(&scores, AggregationMode::Analysis);
        let recommendation = self.classifier.classify(total, &scores);

        tracing::debug!(
            "Scored {}: total {:.2}/100, action {:?}",
            snapshot.ticker,
            total,
            recommendation.action
        );

        let insights = generate_insights(&fundamentals, &valuation, &technicals, &risk);
        let scoring = ScoringBreakdown::from_scores(&scores, total, TOTAL_SCALE_MAX);

        StockAnalysis {
            ticker: snapshot.ticker.clone(),
            company_name: snapshot.company_name.clone(),
            sector: snapshot.sector.clone(),
            industry: snapshot.industry.clone(),
            fundamentals,
            valuation,
            technicals,
            risk,
            scoring,
            recommendation,
            insights,
            last_updated: Utc::now().to_rfc3339(),
        }
    }

    /// Canonical composite result under the declared aggregation mode. Used
    /// directly by the batch ranker.
    pub fn composite(&self, snapshot: &TickerSnapshot, mode: AggregationMode) -> CompositeResult {
        let (fundamentals, valuation, technicals, risk) = self.complete_metrics(snapshot);
        let scores = self.score_categories(&fundamentals, &valuation, &technicals, &risk);
        let total = aggregate(&scores, mode);
        let recommendation = self.classifier.classify(total, &scores);

        CompositeResult {
            ticker: snapshot.ticker.clone(),
            company_name: snapshot.company_name.clone(),
            current_price: snapshot.current_price.or(valuation.current_price),
            category_scores: scores,
            total_score: total,
            total_scale_max: TOTAL_SCALE_MAX,
            recommendation,
        }
    }

    fn complete_metrics(
        &self,
        snapshot: &TickerSnapshot,
    ) -> (
        FundamentalMetrics,
        ValuationMetrics,
        TechnicalMetrics,
        RiskMetrics,
    ) {
        let fundamentals = snapshot.fundamentals.clone();
        let valuation =
            self.valuation
                .complete(&fundamentals, &snapshot.valuation, snapshot.current_price);
        let technicals = self.technical.complete(&snapshot.technicals);
        let risk = self.risk.complete(&fundamentals, &snapshot.risk);
        (fundamentals, valuation, technicals, risk)
    }

    fn score_categories(
        &self,
        fundamentals: &FundamentalMetrics,
        valuation: &ValuationMetrics,
        technicals: &TechnicalMetrics,
        risk: &RiskMetrics,
    ) -> Vec<CategoryScore> {
        vec![
            self.fundamental.score(fundamentals),
            self.valuation.score(fundamentals, valuation),
            self.technical.score(technicals),
            self.risk.score(risk),
        ]
    }
}

impl Default for StockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
