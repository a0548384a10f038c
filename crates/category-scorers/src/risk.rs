use scoring_core::{
    band, threshold, Band, Category, CategoryScore, FundamentalMetrics, Indicator, Reason,
    RiskLevel, RiskMetrics,
};

// Maximum deductions per adverse indicator; they sum to the risk scale (10)
// so a stock that is poor on all three can reach zero.
const DEBT_RISK_DEDUCTION: f64 = 5.0;
const BETA_DEDUCTION: f64 = 3.0;
const VOLATILITY_DEDUCTION: f64 = 2.0;

/// Scores risk-adjusted favorability out of 10. Inverted relative to the
/// other categories: higher raw risk readings reduce the score.
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Derive `debt_risk_score` (0-100, higher = riskier) and the overall
    /// risk label when the resolver did not supply them. The composite adds
    /// leverage, liquidity and beta steps, capped at 100.
    pub fn complete(&self, fundamentals: &FundamentalMetrics, risk: &RiskMetrics) -> RiskMetrics {
        let mut r = risk.clone();

        if r.debt_risk_score.is_none() {
            let mut score: f64 = 0.0;
            let mut any_input = false;

            if let Some(d2e) = fundamentals.debt_to_equity {
                any_input = true;
                if d2e > 2.0 {
                    score += 40.0;
                } else if d2e > 1.0 {
                    score += 20.0;
                }
            }
            if let Some(current_ratio) = fundamentals.current_ratio {
                any_input = true;
                if current_ratio < 1.0 {
                    score += 30.0;
                } else if current_ratio < 1.5 {
                    score += 15.0;
                }
            }
            if let Some(beta) = r.beta {
                any_input = true;
                if beta.abs() > 1.5 {
                    score += 20.0;
                } else if beta.abs() > 1.2 {
                    score += 10.0;
                }
            }

            if any_input {
                r.debt_risk_score = Some(score.min(100.0));
            }
        }

        if r.overall_risk_level.is_none() {
            r.overall_risk_level = match (r.debt_risk_score, r.beta) {
                (None, None) => None,
                (debt, beta) => {
                    let abs_beta = beta.map(f64::abs);
                    if debt.is_some_and(|d| d >= 70.0) || abs_beta.is_some_and(|b| b > 1.5) {
                        Some(RiskLevel::High)
                    } else if debt.map_or(true, |d| d <= 30.0)
                        && abs_beta.map_or(true, |b| b < 1.0)
                    {
                        Some(RiskLevel::Low)
                    } else {
                        Some(RiskLevel::Medium)
                    }
                }
            };
        }

        r
    }

    /// Expects a [`complete`](Self::complete)d metrics block. Starts from the
    /// full scale and deducts per adverse band: poor costs the indicator's
    /// full deduction, ok half. Unknown risk metrics deduct nothing, but a
    /// block with no resolvable indicator at all scores neutral rather than
    /// perfect.
    pub fn score(&self, metrics: &RiskMetrics) -> CategoryScore {
        let scale_max = Category::Risk.scale_max();
        let mut value = scale_max;
        let mut any_present = false;
        let mut contributing = Vec::new();
        let mut detracting = Vec::new();

        let rows: [(Indicator, Option<f64>, Option<f64>, f64); 3] = [
            (
                Indicator::DebtRisk,
                metrics.debt_risk_score,
                metrics.debt_risk_score,
                DEBT_RISK_DEDUCTION,
            ),
            (
                Indicator::Beta,
                metrics.beta.map(f64::abs),
                metrics.beta,
                BETA_DEDUCTION,
            ),
            (
                Indicator::Volatility,
                metrics.volatility_1y,
                metrics.volatility_1y,
                VOLATILITY_DEDUCTION,
            ),
        ];

        for (indicator, banded_value, raw_value, deduction) in rows {
            let Some(b) = band(banded_value, threshold(indicator)) else {
                continue;
            };
            any_present = true;
            match b {
                Band::Good => contributing.push(Reason::contributing(indicator, raw_value)),
                Band::Ok => value -= deduction / 2.0,
                Band::Poor => {
                    value -= deduction;
                    detracting.push(Reason::detracting(indicator, raw_value));
                }
            }
        }

        if !any_present {
            value = scale_max / 2.0;
        }

        CategoryScore {
            category: Category::Risk,
            value: value.clamp(0.0, scale_max),
            scale_max,
            contributing,
            detracting,
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}
