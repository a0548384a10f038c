use crate::types::Indicator;

/// Whether a larger raw value is favorable or adverse for an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// A metric-specific `(good, ok)` threshold pair.
#[derive(Debug, Clone, Copy)]
pub struct Threshold {
    pub good: f64,
    pub ok: f64,
    pub direction: BandDirection,
}

/// The single shared threshold table. Both the scorers and any presentation
/// formatting consume this, so scoring and display can never drift apart.
///
/// RSI is banded on distance from the 50 midline (30-70 is the healthy
/// range); beta is banded on its absolute value.
pub fn threshold(indicator: Indicator) -> Threshold {
    use BandDirection::*;
    use Indicator::*;

    match indicator {
        RevenueGrowth => Threshold { good: 15.0, ok: 0.0, direction: HigherIsBetter },
        EpsGrowth => Threshold { good: 15.0, ok: 0.0, direction: HigherIsBetter },
        ReturnOnEquity => Threshold { good: 20.0, ok: 10.0, direction: HigherIsBetter },
        FcfMargin => Threshold { good: 15.0, ok: 5.0, direction: HigherIsBetter },
        PriceToFairValue => Threshold { good: 1.05, ok: 1.2, direction: LowerIsBetter },
        PeVsHistorical => Threshold { good: 0.8, ok: 1.2, direction: LowerIsBetter },
        PeVsIndustry => Threshold { good: 0.8, ok: 1.2, direction: LowerIsBetter },
        // Distance from the RSI midline: <=20 is 30-70, <=30 is 20-80.
        Rsi => Threshold { good: 20.0, ok: 30.0, direction: LowerIsBetter },
        // Trend and moving-average position are categorical and banded
        // directly by the technical scorer; entries here keep the table
        // total so presentation code can still look them up.
        Trend => Threshold { good: 1.0, ok: 0.0, direction: HigherIsBetter },
        PriceVsMovingAverages => Threshold { good: 0.0, ok: -2.0, direction: HigherIsBetter },
        DebtRisk => Threshold { good: 30.0, ok: 70.0, direction: LowerIsBetter },
        Beta => Threshold { good: 1.2, ok: 1.5, direction: LowerIsBetter },
        Volatility => Threshold { good: 35.0, ok: 50.0, direction: LowerIsBetter },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_is_better_pairs_are_ordered() {
        for indicator in [
            Indicator::PriceToFairValue,
            Indicator::DebtRisk,
            Indicator::Beta,
            Indicator::Volatility,
        ] {
            let t = threshold(indicator);
            assert_eq!(t.direction, BandDirection::LowerIsBetter);
            assert!(t.good < t.ok, "{:?}", indicator);
        }
    }

    #[test]
    fn higher_is_better_pairs_are_ordered() {
        for indicator in [Indicator::RevenueGrowth, Indicator::ReturnOnEquity] {
            let t = threshold(indicator);
            assert_eq!(t.direction, BandDirection::HigherIsBetter);
            assert!(t.good > t.ok, "{:?}", indicator);
        }
    }
}
