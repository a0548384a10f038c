use crate::aggregator::TOTAL_SCALE_MAX;
use scoring_core::{Action, CategoryScore, Recommendation};

/// Buy/Hold boundary as a fraction of the total scale. Equivalent to >=20
/// on the /30 screener surface and >=67 on the 100-point analysis surface.
pub const BUY_BOUNDARY: f64 = 2.0 / 3.0;
/// Hold/Avoid boundary.
pub const HOLD_BOUNDARY: f64 = 0.5;

/// How fast confidence grows per point of distance from the nearest
/// classification boundary.
const CONFIDENCE_SLOPE: f64 = 1.5;
const CONFIDENCE_BASE: f64 = 50.0;
const CONFIDENCE_CAP: f64 = 95.0;

/// Reasoning lists are truncated to keep the payload compact.
const MAX_REASONS: usize = 6;

/// Maps a total score to Buy/Hold/Avoid plus a confidence value. Three
/// terminal states, no intermediates; ties at an exact boundary resolve to
/// the higher category.
pub struct RecommendationClassifier;

impl RecommendationClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, total_score: f64, scores: &[CategoryScore]) -> Recommendation {
        let buy_cut = BUY_BOUNDARY * TOTAL_SCALE_MAX;
        let hold_cut = HOLD_BOUNDARY * TOTAL_SCALE_MAX;

        // Inclusive on the upper side: a score exactly at a boundary takes
        // the higher category.
        let action = if total_score >= buy_cut {
            Action::Buy
        } else if total_score >= hold_cut {
            Action::Hold
        } else {
            Action::Avoid
        };

        // Distance in points from the nearest boundary; confidence is
        // monotonic non-decreasing in it.
        let distance = match action {
            Action::Buy => total_score - buy_cut,
            Action::Hold => (total_score - hold_cut).min(buy_cut - total_score),
            Action::Avoid => hold_cut - total_score,
        };
        let confidence =
            (CONFIDENCE_BASE + distance * CONFIDENCE_SLOPE).clamp(0.0, CONFIDENCE_CAP);

        Recommendation {
            action,
            score: total_score,
            confidence,
            reasoning: self.collect_reasoning(action, scores),
        }
    }

    /// Contributing reasons back a Buy, detracting reasons back an Avoid,
    /// a Hold cites both sides. Order is category declaration order then
    /// indicator order, truncated deterministically.
    fn collect_reasoning(&self, action: Action, scores: &[CategoryScore]) -> Vec<String> {
        let mut reasoning = Vec::new();

        if matches!(action, Action::Buy | Action::Hold) {
            for score in scores {
                reasoning.extend(score.contributing.iter().map(|r| r.render()));
            }
        }
        if matches!(action, Action::Avoid | Action::Hold) {
            for score in scores {
                reasoning.extend(score.detracting.iter().map(|r| r.render()));
            }
        }

        reasoning.truncate(MAX_REASONS);
        if reasoning.is_empty() {
            reasoning.push("Mixed signals - review carefully".to_string());
        }
        reasoning
    }
}

impl Default for RecommendationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::{Category, Indicator, Reason};

    fn empty_scores() -> Vec<CategoryScore> {
        Category::ALL
            .iter()
            .map(|&category| CategoryScore {
                category,
                value: 0.0,
                scale_max: category.scale_max(),
                contributing: vec![],
                detracting: vec![],
            })
            .collect()
    }

    #[test]
    fn exact_buy_boundary_classifies_as_buy() {
        let classifier = RecommendationClassifier::new();
        let rec = classifier.classify(BUY_BOUNDARY * TOTAL_SCALE_MAX, &empty_scores());
        assert_eq!(rec.action, Action::Buy);
    }

    #[test]
    fn exact_hold_boundary_classifies_as_hold() {
        let classifier = RecommendationClassifier::new();
        let rec = classifier.classify(50.0, &empty_scores());
        assert_eq!(rec.action, Action::Hold);
    }

    #[test]
    fn below_hold_boundary_is_avoid() {
        let classifier = RecommendationClassifier::new();
        let rec = classifier.classify(49.9, &empty_scores());
        assert_eq!(rec.action, Action::Avoid);
    }

    #[test]
    fn confidence_grows_with_boundary_distance() {
        let classifier = RecommendationClassifier::new();
        let scores = empty_scores();

        let near_buy = classifier.classify(68.0, &scores);
        let deep_buy = classifier.classify(90.0, &scores);
        assert!(deep_buy.confidence > near_buy.confidence);

        let near_avoid = classifier.classify(49.0, &scores);
        let deep_avoid = classifier.classify(10.0, &scores);
        assert!(deep_avoid.confidence > near_avoid.confidence);

        for rec in [near_buy, deep_buy, near_avoid, deep_avoid] {
            assert!(rec.confidence >= 0.0 && rec.confidence <= 100.0);
        }
    }

    #[test]
    fn hold_cites_both_sides_and_truncates() {
        let classifier = RecommendationClassifier::new();
        let mut scores = empty_scores();
        scores[0].contributing = vec![
            Reason::contributing(Indicator::RevenueGrowth, Some(20.0)),
            Reason::contributing(Indicator::EpsGrowth, Some(18.0)),
            Reason::contributing(Indicator::ReturnOnEquity, Some(25.0)),
            Reason::contributing(Indicator::FcfMargin, Some(22.0)),
        ];
        scores[3].detracting = vec![
            Reason::detracting(Indicator::Beta, Some(1.9)),
            Reason::detracting(Indicator::Volatility, Some(60.0)),
            Reason::detracting(Indicator::DebtRisk, Some(80.0)),
        ];

        let rec = classifier.classify(55.0, &scores);
        assert_eq!(rec.action, Action::Hold);
        assert_eq!(rec.reasoning.len(), 6);
        // Contributing reasons come first, in declaration order.
        assert!(rec.reasoning[0].contains("revenue growth"));
    }

    #[test]
    fn avoid_reasoning_uses_detracting_reasons() {
        let classifier = RecommendationClassifier::new();
        let mut scores = empty_scores();
        scores[0].contributing = vec![Reason::contributing(Indicator::RevenueGrowth, Some(20.0))];
        scores[0].detracting = vec![Reason::detracting(Indicator::EpsGrowth, Some(-15.0))];

        let rec = classifier.classify(30.0, &scores);
        assert_eq!(rec.action, Action::Avoid);
        assert!(rec.reasoning.iter().all(|r| !r.contains("revenue growth")));
        assert!(rec.reasoning[0].contains("Earnings declining"));
    }
}
