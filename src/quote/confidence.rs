//! Confidence scoring and tier buckets.

use serde::{Deserialize, Serialize};

use super::types::Material;

const HIGH_THRESHOLD: f64 = 0.75;
const MEDIUM_THRESHOLD: f64 = 0.60;
const LOW_THRESHOLD: f64 = 0.40;

/// Weight of material-resolution completeness in the task score.
const MATERIAL_WEIGHT: f64 = 0.7;
/// Weight of task-label clarity in the task score.
const CLARITY_WEIGHT: f64 = 0.3;

/// Discrete bucket summarizing a continuous similarity or task score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    VeryLow,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::VeryLow => "VERY_LOW",
        };
        write!(f, "{}", s)
    }
}

/// Map a score in [0, 1] to its tier.
pub fn confidence_tier(score: f64) -> ConfidenceTier {
    if score >= HIGH_THRESHOLD {
        ConfidenceTier::High
    } else if score >= MEDIUM_THRESHOLD {
        ConfidenceTier::Medium
    } else if score >= LOW_THRESHOLD {
        ConfidenceTier::Low
    } else {
        ConfidenceTier::VeryLow
    }
}

/// Per-task confidence combining material-resolution completeness with
/// task-label clarity. Always in [0, 1], rounded to two decimals.
///
/// A task with no materials scores zero on the material axis.
pub fn confidence_score(materials: &[Material], label: &str) -> f64 {
    let material_confidence = if materials.is_empty() {
        0.0
    } else {
        let priced = materials
            .iter()
            .filter(|m| m.unit_price.resolved().is_some_and(|p| p > 0.0))
            .count();
        priced as f64 / materials.len() as f64
    };

    let task_clarity = if label.split_whitespace().count() >= 3 {
        0.9
    } else {
        0.7
    };

    let weighted = material_confidence * MATERIAL_WEIGHT + task_clarity * CLARITY_WEIGHT;

    ((weighted * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::types::UnitPrice;

    fn material(unit_price: UnitPrice) -> Material {
        Material {
            name: "tile".to_string(),
            quantity: 1.0,
            unit: "m2".to_string(),
            unit_price,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(confidence_tier(0.75), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.60), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(0.40), ConfidenceTier::Low);
        assert_eq!(confidence_tier(0.39), ConfidenceTier::VeryLow);
        assert_eq!(confidence_tier(1.0), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.0), ConfidenceTier::VeryLow);
    }

    #[test]
    fn test_tiering_is_idempotent() {
        for score in [0.0, 0.39, 0.4, 0.6, 0.75, 1.0] {
            assert_eq!(confidence_tier(score), confidence_tier(score));
        }
    }

    #[test]
    fn test_fully_resolved_clear_label() {
        let materials = vec![material(UnitPrice::Resolved(20.0))];
        // 1.0 * 0.7 + 0.9 * 0.3
        assert_eq!(confidence_score(&materials, "Install bathroom tile"), 0.97);
    }

    #[test]
    fn test_unresolved_materials_lower_the_score() {
        let materials = vec![
            material(UnitPrice::Resolved(20.0)),
            material(UnitPrice::Unresolved),
        ];
        // 0.5 * 0.7 + 0.9 * 0.3
        assert_eq!(confidence_score(&materials, "Install bathroom tile"), 0.62);
    }

    #[test]
    fn test_short_label_gets_lower_clarity() {
        let materials = vec![material(UnitPrice::Resolved(20.0))];
        // 1.0 * 0.7 + 0.7 * 0.3
        assert_eq!(confidence_score(&materials, "Tiling"), 0.91);
    }

    #[test]
    fn test_zero_materials_scores_on_clarity_alone() {
        assert_eq!(confidence_score(&[], "Install bathroom tile"), 0.27);
        assert_eq!(confidence_score(&[], "Tiling"), 0.21);
    }

    #[test]
    fn test_zero_priced_material_counts_as_unresolved() {
        let materials = vec![material(UnitPrice::Resolved(0.0))];
        assert_eq!(confidence_score(&materials, "Install bathroom tile"), 0.27);
    }

    #[test]
    fn test_score_always_bounded() {
        let cases: Vec<Vec<Material>> = vec![
            vec![],
            vec![material(UnitPrice::Resolved(1e9))],
            vec![material(UnitPrice::Unresolved); 7],
        ];
        for materials in cases {
            for label in ["", "Fix", "Replace the entire roof structure"] {
                let score = confidence_score(&materials, label);
                assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            }
        }
    }
}
