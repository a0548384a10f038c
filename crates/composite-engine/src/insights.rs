use scoring_core::{
    FundamentalMetrics, RiskMetrics, TechnicalMetrics, TrendDirection, ValuationMetrics,
};

/// Plain-English observations for the dashboard's insights card. Purely a
/// presentation projection over the completed metric blocks; nothing here
/// feeds back into scoring.
pub fn generate_insights(
    fundamentals: &FundamentalMetrics,
    valuation: &ValuationMetrics,
    technicals: &TechnicalMetrics,
    risk: &RiskMetrics,
) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(growth) = fundamentals.revenue_growth_yoy {
        if growth > 15.0 {
            insights.push(format!("Strong revenue growth of {:.1}% YoY", growth));
        } else if growth < 0.0 {
            insights.push(format!("Revenue declining by {:.1}% YoY", growth.abs()));
        }
    }

    if let Some(pe) = fundamentals.pe_ratio {
        if pe < 15.0 {
            insights.push(format!("Trading at attractive P/E ratio of {:.1}", pe));
        } else if pe > 30.0 {
            insights.push(format!(
                "High P/E ratio of {:.1} suggests premium valuation",
                pe
            ));
        }
    }

    if let Some(ptfv) = valuation.price_to_fair_value {
        if ptfv < 0.9 {
            insights.push(format!(
                "Trading at {:.1}% discount to estimated fair value",
                (1.0 - ptfv) * 100.0
            ));
        } else if ptfv > 1.1 {
            insights.push(format!(
                "Trading at {:.1}% premium to estimated fair value",
                (ptfv - 1.0) * 100.0
            ));
        }
    }

    if let Some(trend) = technicals.trend_direction {
        let label = match trend {
            TrendDirection::Bullish => "Bullish",
            TrendDirection::Neutral => "Neutral",
            TrendDirection::Bearish => "Bearish",
        };
        insights.push(format!("Technical trend: {}", label));
    }

    if let Some(rsi) = technicals.rsi_14 {
        if rsi > 70.0 {
            insights.push("RSI indicates overbought conditions".to_string());
        } else if rsi < 30.0 {
            insights.push("RSI indicates oversold conditions".to_string());
        }
    }

    if let Some(beta) = risk.beta {
        if beta.abs() > 1.3 {
            insights.push(format!("High volatility (Beta: {:.2})", beta));
        } else if beta.abs() < 0.8 {
            insights.push(format!("Lower volatility (Beta: {:.2})", beta));
        }
    }

    if let Some(drawdown) = risk.max_drawdown_1y {
        if drawdown.abs() > 30.0 {
            insights.push(format!(
                "Significant drawdown risk ({:.1}% max drawdown)",
                drawdown
            ));
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_metrics_produce_no_noise() {
        let insights = generate_insights(
            &FundamentalMetrics {
                revenue_growth_yoy: Some(5.0),
                pe_ratio: Some(20.0),
                ..Default::default()
            },
            &ValuationMetrics {
                price_to_fair_value: Some(1.0),
                ..Default::default()
            },
            &TechnicalMetrics {
                rsi_14: Some(55.0),
                ..Default::default()
            },
            &RiskMetrics {
                beta: Some(1.0),
                ..Default::default()
            },
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn notable_metrics_surface() {
        let insights = generate_insights(
            &FundamentalMetrics {
                revenue_growth_yoy: Some(22.0),
                pe_ratio: Some(12.0),
                ..Default::default()
            },
            &ValuationMetrics::default(),
            &TechnicalMetrics {
                trend_direction: Some(TrendDirection::Bullish),
                rsi_14: Some(75.0),
                ..Default::default()
            },
            &RiskMetrics {
                beta: Some(1.6),
                max_drawdown_1y: Some(-35.0),
                ..Default::default()
            },
        );
        assert_eq!(insights.len(), 6);
        assert!(insights[0].contains("22.0%"));
        assert!(insights.iter().any(|i| i.contains("overbought")));
    }
}
