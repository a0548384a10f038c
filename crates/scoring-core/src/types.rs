use serde::{Deserialize, Serialize};

/// Raw fundamental metrics for one ticker. Every field is optional: an
/// unresolved metric stays `None` and is excluded from scoring, it is never
/// coerced to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalMetrics {
    pub revenue_growth_yoy: Option<f64>,
    pub revenue_growth_5y_cagr: Option<f64>,
    pub eps_growth: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub roic: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub fcf_margin: Option<f64>,
    pub current_ratio: Option<f64>,
    pub profit_margin: Option<f64>,
}

/// Valuation metrics. `fair_value_estimate`, `price_to_fair_value` and the
/// comparison labels can be supplied by the resolver or derived by the
/// valuation scorer when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValuationMetrics {
    pub current_price: Option<f64>,
    pub fair_value_estimate: Option<f64>,
    pub valuation_method: Option<String>,
    pub price_to_fair_value: Option<f64>,
    pub historical_pe_avg: Option<f64>,
    pub industry_pe_avg: Option<f64>,
    pub price_vs_historical: Option<ValueLabel>,
    pub price_vs_industry: Option<ValueLabel>,
}

/// "Overvalued" / "Fair" / "Undervalued" comparison label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueLabel {
    Undervalued,
    Fair,
    Overvalued,
}

/// Technical indicator readings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalMetrics {
    pub price_50d_ma: Option<f64>,
    pub price_200d_ma: Option<f64>,
    /// Percent distance of the last price from the 50-day moving average.
    pub price_vs_50d_ma: Option<f64>,
    pub price_vs_200d_ma: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub support_level: Option<f64>,
    pub resistance_level: Option<f64>,
    pub trend_direction: Option<TrendDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Bullish,
    Neutral,
    Bearish,
}

/// Risk metrics. `debt_risk_score` is 0-100, higher = riskier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub beta: Option<f64>,
    pub max_drawdown_1y: Option<f64>,
    pub volatility_1y: Option<f64>,
    pub earnings_variability: Option<f64>,
    pub debt_risk_score: Option<f64>,
    pub overall_risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Fully resolved input for one ticker, supplied per invocation by a
/// [`crate::MetricResolver`]. The engine is agnostic to where the numbers
/// came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub ticker: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub current_price: Option<f64>,
    #[serde(default)]
    pub fundamentals: FundamentalMetrics,
    #[serde(default)]
    pub valuation: ValuationMetrics,
    #[serde(default)]
    pub technicals: TechnicalMetrics,
    #[serde(default)]
    pub risk: RiskMetrics,
}

impl TickerSnapshot {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: None,
            sector: None,
            industry: None,
            current_price: None,
            fundamentals: FundamentalMetrics::default(),
            valuation: ValuationMetrics::default(),
            technicals: TechnicalMetrics::default(),
            risk: RiskMetrics::default(),
        }
    }
}

/// The four scoring categories. Declaration order is the canonical iteration
/// order for aggregation and reason output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fundamental,
    Valuation,
    Technical,
    Risk,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Fundamental,
        Category::Valuation,
        Category::Technical,
        Category::Risk,
    ];

    /// Sub-scale maximum on the canonical 100-point scale.
    pub fn scale_max(&self) -> f64 {
        match self {
            Category::Fundamental => 40.0,
            Category::Valuation => 30.0,
            Category::Technical => 20.0,
            Category::Risk => 10.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Fundamental => "Fundamental",
            Category::Valuation => "Valuation",
            Category::Technical => "Technical",
            Category::Risk => "Risk",
        }
    }
}

/// Every scored indicator. Declaration order fixes the order reasons are
/// emitted in, so output is deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    RevenueGrowth,
    EpsGrowth,
    ReturnOnEquity,
    FcfMargin,
    PriceToFairValue,
    PeVsHistorical,
    PeVsIndustry,
    Trend,
    Rsi,
    PriceVsMovingAverages,
    DebtRisk,
    Beta,
    Volatility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonDirection {
    Contributing,
    Detracting,
}

/// Structured reason record. Free-text rendering is a pure projection via
/// [`Reason::render`]; the scoring core stays testable on structured data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reason {
    pub indicator: Indicator,
    pub direction: ReasonDirection,
    /// The raw metric value the band decision was made on, when numeric.
    pub magnitude: Option<f64>,
}

impl Reason {
    pub fn contributing(indicator: Indicator, magnitude: Option<f64>) -> Self {
        Self {
            indicator,
            direction: ReasonDirection::Contributing,
            magnitude,
        }
    }

    pub fn detracting(indicator: Indicator, magnitude: Option<f64>) -> Self {
        Self {
            indicator,
            direction: ReasonDirection::Detracting,
            magnitude,
        }
    }

    /// Render the plain-English reason string shown on the dashboard.
    pub fn render(&self) -> String {
        use Indicator::*;
        use ReasonDirection::*;

        let m = self.magnitude.unwrap_or(0.0);
        match (self.indicator, self.direction) {
            (RevenueGrowth, Contributing) => {
                format!("Strong revenue growth of {:.1}% indicates expanding business", m)
            }
            (RevenueGrowth, Detracting) => {
                format!("Revenue declining by {:.1}% - business contraction", m.abs())
            }
            (EpsGrowth, Contributing) => {
                format!("Impressive EPS growth of {:.1}% shows profitability improvement", m)
            }
            (EpsGrowth, Detracting) => {
                format!("Earnings declining by {:.1}% - profitability concerns", m.abs())
            }
            (ReturnOnEquity, Contributing) => {
                format!("Excellent ROE of {:.1}% shows efficient capital use", m)
            }
            (ReturnOnEquity, Detracting) => {
                format!("Low ROE of {:.1}% indicates inefficient capital allocation", m)
            }
            (FcfMargin, Contributing) => {
                format!("Healthy free cash flow margin of {:.1}%", m)
            }
            (FcfMargin, Detracting) => {
                format!("Weak free cash flow margin of {:.1}%", m)
            }
            (PriceToFairValue, Contributing) => {
                if m < 1.0 {
                    format!(
                        "Trading at {:.1}% discount to estimated fair value",
                        (1.0 - m) * 100.0
                    )
                } else {
                    "Trading near estimated fair value".to_string()
                }
            }
            (PriceToFairValue, Detracting) => {
                format!(
                    "Trading at {:.1}% premium to estimated fair value",
                    (m - 1.0) * 100.0
                )
            }
            (PeVsHistorical, Contributing) => {
                "P/E below its historical average suggests good value".to_string()
            }
            (PeVsHistorical, Detracting) => {
                "P/E well above its historical average indicates overvaluation risk".to_string()
            }
            (PeVsIndustry, Contributing) => {
                "P/E below the industry average suggests relative value".to_string()
            }
            (PeVsIndustry, Detracting) => {
                "P/E well above the industry average".to_string()
            }
            (Trend, Contributing) => {
                "Bullish trend with price above key moving averages".to_string()
            }
            (Trend, Detracting) => {
                "Bearish trend with price below key moving averages".to_string()
            }
            (Rsi, Contributing) => format!("RSI of {:.0} in a healthy range", m),
            (Rsi, Detracting) => {
                if m >= 50.0 {
                    format!("RSI of {:.0} indicates overbought conditions", m)
                } else {
                    format!("RSI of {:.0} indicates oversold conditions", m)
                }
            }
            (PriceVsMovingAverages, Contributing) => {
                "Price above both 50-day and 200-day moving averages".to_string()
            }
            (PriceVsMovingAverages, Detracting) => {
                "Price below its 50-day moving average - poor price action".to_string()
            }
            (DebtRisk, Contributing) => {
                "Low debt and solid liquidity show financial stability".to_string()
            }
            (DebtRisk, Detracting) => {
                "Elevated debt load increases financial risk".to_string()
            }
            (Beta, Contributing) => {
                format!("Low beta of {:.2} provides portfolio stability", m)
            }
            (Beta, Detracting) => {
                format!("High beta of {:.2} means high volatility and market sensitivity", m)
            }
            (Volatility, Contributing) => {
                format!("Modest annualized volatility of {:.0}%", m)
            }
            (Volatility, Detracting) => {
                format!("High annualized volatility of {:.0}%", m)
            }
        }
    }
}

/// One category's bounded score plus its qualitative reasons.
/// Invariant: `0 <= value <= scale_max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub value: f64,
    pub scale_max: f64,
    pub contributing: Vec<Reason>,
    pub detracting: Vec<Reason>,
}

impl CategoryScore {
    /// Score expressed as a fraction of its own scale maximum.
    pub fn normalized(&self) -> f64 {
        if self.scale_max > 0.0 {
            self.value / self.scale_max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Hold,
    Avoid,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Buy => "Buy",
            Action::Hold => "Hold",
            Action::Avoid => "Avoid",
        }
    }
}

/// Final categorical recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Total score on the canonical 0-100 scale.
    pub score: f64,
    /// 0-100, monotonic in distance from the nearest classification boundary.
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

/// Complete scored result for one ticker. Immutable after construction;
/// recomputing from the same category scores reproduces `total_score`
/// bit-for-bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeResult {
    pub ticker: String,
    pub company_name: Option<String>,
    pub current_price: Option<f64>,
    /// Exactly one entry per category, in declaration order.
    pub category_scores: Vec<CategoryScore>,
    pub total_score: f64,
    pub total_scale_max: f64,
    pub recommendation: Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_is_stable() {
        assert_eq!(Category::ALL[0], Category::Fundamental);
        assert_eq!(Category::ALL[3], Category::Risk);
        let sum: f64 = Category::ALL.iter().map(|c| c.scale_max()).sum();
        assert_eq!(sum, 100.0);
    }

    #[test]
    fn unresolved_price_round_trips_as_null_not_zero() {
        let snapshot = TickerSnapshot::new("AAPL");
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["current_price"].is_null());

        let back: TickerSnapshot = serde_json::from_value(json).unwrap();
        assert!(back.current_price.is_none());
        assert!(back.fundamentals.pe_ratio.is_none());
    }

    #[test]
    fn reason_renders_discount_and_premium() {
        let discount = Reason::contributing(Indicator::PriceToFairValue, Some(0.8));
        assert!(discount.render().contains("20.0% discount"));

        let premium = Reason::detracting(Indicator::PriceToFairValue, Some(1.25));
        assert!(premium.render().contains("25.0% premium"));
    }
}
