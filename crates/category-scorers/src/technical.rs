use scoring_core::{
    band, threshold, Band, Category, CategoryScore, Indicator, Reason, TechnicalMetrics,
    TrendDirection,
};

const TREND_WEIGHT: f64 = 10.0;
const RSI_WEIGHT: f64 = 5.0;
const MA_POSITION_WEIGHT: f64 = 5.0;

// Percent distance from the 50-day MA required before a trend call is made.
const TREND_CONFIRMATION_PCT: f64 = 2.0;

/// Scores trend, momentum and moving-average position out of 20.
pub struct TechnicalScorer;

impl TechnicalScorer {
    pub fn new() -> Self {
        Self
    }

    /// Derive `trend_direction` from the moving-average distances when the
    /// resolver did not supply it. Bullish needs price more than 2% above
    /// the 50-day MA with the 50-day above the 200-day; bearish mirrored.
    /// With either MA distance unknown the trend stays unknown.
    pub fn complete(&self, metrics: &TechnicalMetrics) -> TechnicalMetrics {
        let mut t = metrics.clone();
        if t.trend_direction.is_none() {
            t.trend_direction = match (t.price_vs_50d_ma, t.price_vs_200d_ma) {
                (Some(p50), Some(p200)) => {
                    // price/ma50 < price/ma200 exactly when ma50 > ma200
                    if p50 > TREND_CONFIRMATION_PCT && p200 > p50 {
                        Some(TrendDirection::Bullish)
                    } else if p50 < -TREND_CONFIRMATION_PCT && p200 < p50 {
                        Some(TrendDirection::Bearish)
                    } else {
                        Some(TrendDirection::Neutral)
                    }
                }
                _ => None,
            };
        }
        t
    }

    /// Expects a [`complete`](Self::complete)d metrics block.
    pub fn score(&self, metrics: &TechnicalMetrics) -> CategoryScore {
        let scale_max = Category::Technical.scale_max();
        let mut earned = 0.0;
        let mut present_weight = 0.0;
        let mut contributing = Vec::new();
        let mut detracting = Vec::new();

        // Trend direction is categorical: Bullish maps to the good band,
        // Neutral to ok, Bearish to poor.
        if let Some(trend) = metrics.trend_direction {
            let b = match trend {
                TrendDirection::Bullish => Band::Good,
                TrendDirection::Neutral => Band::Ok,
                TrendDirection::Bearish => Band::Poor,
            };
            present_weight += TREND_WEIGHT;
            earned += TREND_WEIGHT * b.weight_fraction();
            match b {
                Band::Good => contributing.push(Reason::contributing(
                    Indicator::Trend,
                    metrics.price_vs_50d_ma,
                )),
                Band::Poor => detracting.push(Reason::detracting(
                    Indicator::Trend,
                    metrics.price_vs_50d_ma,
                )),
                Band::Ok => {}
            }
        }

        // RSI banded on distance from the 50 midline.
        let rsi_distance = metrics.rsi_14.map(|rsi| (rsi - 50.0).abs());
        if let Some(b) = band(rsi_distance, threshold(Indicator::Rsi)) {
            present_weight += RSI_WEIGHT;
            earned += RSI_WEIGHT * b.weight_fraction();
            match b {
                Band::Good => {
                    contributing.push(Reason::contributing(Indicator::Rsi, metrics.rsi_14))
                }
                Band::Poor => detracting.push(Reason::detracting(Indicator::Rsi, metrics.rsi_14)),
                Band::Ok => {}
            }
        }

        // Moving-average position: above both is good, above the 50-day
        // alone is ok. Scored when at least the 50-day distance is known.
        if let Some(p50) = metrics.price_vs_50d_ma {
            let b = match metrics.price_vs_200d_ma {
                Some(p200) if p50 > 0.0 && p200 > 0.0 => Band::Good,
                _ if p50 > 0.0 => Band::Ok,
                _ => Band::Poor,
            };
            present_weight += MA_POSITION_WEIGHT;
            earned += MA_POSITION_WEIGHT * b.weight_fraction();
            match b {
                Band::Good => contributing.push(Reason::contributing(
                    Indicator::PriceVsMovingAverages,
                    Some(p50),
                )),
                Band::Poor => detracting.push(Reason::detracting(
                    Indicator::PriceVsMovingAverages,
                    Some(p50),
                )),
                Band::Ok => {}
            }
        }

        let value = if present_weight > 0.0 {
            (earned / present_weight) * scale_max
        } else {
            scale_max / 2.0
        };

        CategoryScore {
            category: Category::Technical,
            value: value.clamp(0.0, scale_max),
            scale_max,
            contributing,
            detracting,
        }
    }
}

impl Default for TechnicalScorer {
    fn default() -> Self {
        Self::new()
    }
}
