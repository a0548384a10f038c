use crate::thresholds::{BandDirection, Threshold};

/// Quality band for a single raw metric. The band classifies magnitude for
/// downstream reason generation; the raw value itself is kept alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Good,
    Ok,
    Poor,
}

impl Band {
    /// Fraction of the indicator's declared weight this band contributes:
    /// good earns the full weight, ok earns half, poor earns nothing.
    pub fn weight_fraction(&self) -> f64 {
        match self {
            Band::Good => 1.0,
            Band::Ok => 0.5,
            Band::Poor => 0.0,
        }
    }
}

/// Classify one raw metric value against its `(good, ok)` threshold pair.
///
/// A missing value propagates as `None` (unknown). Callers must exclude
/// unknowns from the weighted sum rather than penalize them; silently
/// treating missing as zero is a correctness bug.
pub fn band(value: Option<f64>, threshold: Threshold) -> Option<Band> {
    let v = value?;
    Some(match threshold.direction {
        BandDirection::HigherIsBetter => {
            if v >= threshold.good {
                Band::Good
            } else if v >= threshold.ok {
                Band::Ok
            } else {
                Band::Poor
            }
        }
        BandDirection::LowerIsBetter => {
            if v <= threshold.good {
                Band::Good
            } else if v <= threshold.ok {
                Band::Ok
            } else {
                Band::Poor
            }
        }
    })
}

/// Round to two decimals for display payloads. Scoring itself keeps full
/// precision; only the view structures round.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::threshold;
    use crate::types::Indicator;

    #[test]
    fn higher_is_better_banding() {
        let t = threshold(Indicator::RevenueGrowth); // good 15, ok 0
        assert_eq!(band(Some(22.0), t), Some(Band::Good));
        assert_eq!(band(Some(15.0), t), Some(Band::Good)); // boundary inclusive
        assert_eq!(band(Some(4.0), t), Some(Band::Ok));
        assert_eq!(band(Some(-3.0), t), Some(Band::Poor));
    }

    #[test]
    fn lower_is_better_banding() {
        let t = threshold(Indicator::Beta); // good 1.2, ok 1.5
        assert_eq!(band(Some(0.9), t), Some(Band::Good));
        assert_eq!(band(Some(1.35), t), Some(Band::Ok));
        assert_eq!(band(Some(1.8), t), Some(Band::Poor));
    }

    #[test]
    fn unknown_stays_unknown() {
        let t = threshold(Indicator::ReturnOnEquity);
        assert_eq!(band(None, t), None);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(66.666), 66.67);
        assert_eq!(round2(-0.005), -0.01);
    }
}
