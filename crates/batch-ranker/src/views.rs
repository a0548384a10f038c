use composite_engine::TOTAL_SCALE_MAX;
use scoring_core::{round2, Category, CompositeResult, TickerSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Display maxima for the screener surface. The engine scores on the
// canonical 100-point scale; this view projects each score onto the scale
// the screener table shows ("out of 30").
const TOTAL_DISPLAY_MAX: f64 = 30.0;
const FUNDAMENTAL_DISPLAY_MAX: f64 = 30.0;
const TECHNICAL_DISPLAY_MAX: f64 = 20.0;
const RISK_DISPLAY_MAX: f64 = 10.0;

// Display-scale cutoffs mirroring the classifier boundaries (20/30 = Buy,
// 15/30 = Hold).
const STRONG_TOTAL_DISPLAY: f64 = 20.0;
const WEAK_TOTAL_DISPLAY: f64 = 15.0;

/// One ranked screener/daily-picks table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerRow {
    pub ticker: String,
    pub company_name: Option<String>,
    pub current_price: Option<f64>,
    pub fundamental_score: f64,
    pub technical_score: f64,
    pub risk_score: f64,
    pub total_score: f64,
    pub recommendation: String,
    pub why_choose: Vec<String>,
    pub why_avoid: Vec<String>,
    pub key_metrics: BTreeMap<String, String>,
}

impl ScreenerRow {
    pub fn build(composite: &CompositeResult, snapshot: &TickerSnapshot) -> Self {
        let display_of = |category: Category, display_max: f64| {
            composite
                .category_scores
                .iter()
                .find(|s| s.category == category)
                .map(|s| round2(s.normalized() * display_max))
                .unwrap_or(0.0)
        };

        let total_display =
            round2(composite.total_score / TOTAL_SCALE_MAX * TOTAL_DISPLAY_MAX);

        let mut why_choose: Vec<String> = Vec::new();
        let mut why_avoid: Vec<String> = Vec::new();
        for score in &composite.category_scores {
            why_choose.extend(score.contributing.iter().map(|r| r.render()));
            why_avoid.extend(score.detracting.iter().map(|r| r.render()));
        }

        if total_display >= STRONG_TOTAL_DISPLAY {
            why_choose.push(format!(
                "High overall score of {:.1}/30 indicates strong investment potential",
                total_display
            ));
        } else if total_display < WEAK_TOTAL_DISPLAY {
            why_avoid.push(format!(
                "Low overall score of {:.1}/30 suggests limited upside potential",
                total_display
            ));
        }

        if why_choose.is_empty() {
            why_choose.push("Moderate fundamentals with room for improvement".to_string());
        }
        if why_avoid.is_empty() {
            why_avoid.push("No major red flags but limited upside".to_string());
        }

        Self {
            ticker: composite.ticker.clone(),
            company_name: composite.company_name.clone(),
            current_price: composite.current_price,
            fundamental_score: display_of(Category::Fundamental, FUNDAMENTAL_DISPLAY_MAX),
            technical_score: display_of(Category::Technical, TECHNICAL_DISPLAY_MAX),
            risk_score: display_of(Category::Risk, RISK_DISPLAY_MAX),
            total_score: total_display,
            recommendation: composite.recommendation.action.label().to_string(),
            why_choose,
            why_avoid,
            key_metrics: key_metrics(snapshot),
        }
    }
}

/// Screener/daily-picks payload for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerReport {
    pub date: String,
    pub generated_at: String,
    pub total_analyzed: usize,
    /// True when the batch deadline expired before every ticker finished.
    pub partial: bool,
    pub results: Vec<ScreenerRow>,
}

fn key_metrics(snapshot: &TickerSnapshot) -> BTreeMap<String, String> {
    let mut metrics = BTreeMap::new();
    let f = &snapshot.fundamentals;

    if let Some(v) = f.revenue_growth_yoy {
        metrics.insert("revenue_growth".to_string(), format!("{:.1}%", v));
    }
    if let Some(v) = f.eps_growth {
        metrics.insert("eps_growth".to_string(), format!("{:.1}%", v));
    }
    if let Some(v) = f.pe_ratio {
        metrics.insert("pe_ratio".to_string(), format!("{:.2}", v));
    }
    if let Some(v) = f.forward_pe {
        metrics.insert("forward_pe".to_string(), format!("{:.2}", v));
    }
    if let Some(v) = f.roe {
        metrics.insert("roe".to_string(), format!("{:.1}%", v));
    }
    if let Some(v) = f.debt_to_equity {
        metrics.insert("debt_to_equity".to_string(), format!("{:.2}", v));
    }
    if let Some(v) = snapshot.risk.beta {
        metrics.insert("beta".to_string(), format!("{:.2}", v));
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use composite_engine::{AggregationMode, StockAnalyzer};
    use scoring_core::FundamentalMetrics;

    #[test]
    fn row_projects_onto_display_scale() {
        let mut snapshot = TickerSnapshot::new("MSFT");
        snapshot.fundamentals = FundamentalMetrics {
            revenue_growth_yoy: Some(20.0),
            eps_growth: Some(20.0),
            roe: Some(25.0),
            fcf_margin: Some(20.0),
            pe_ratio: Some(25.0),
            ..Default::default()
        };
        let analyzer = StockAnalyzer::new();
        let composite = analyzer.composite(&snapshot, AggregationMode::Screener);
        let row = ScreenerRow::build(&composite, &snapshot);

        // Perfect fundamentals project to the full 30-point display scale.
        assert_eq!(row.fundamental_score, 30.0);
        assert!(row.total_score <= TOTAL_DISPLAY_MAX);
        assert!(row.key_metrics.contains_key("pe_ratio"));
        assert!(!row.why_choose.is_empty());
    }
}
