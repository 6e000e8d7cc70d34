//! 策略评估引擎：对所选策略的条件逐项打分，按权重汇总出策略关结论。

pub mod scorer;

pub use scorer::{ConditionScorer, FixedScorer, RandomScorer};

use journal_core::{round2, Strategy, StrategyGate};
use std::collections::BTreeMap;

/// 对策略做一次条件加权评估。
///
/// 每个条件由打分器给出 [0, 100] 的单项分，总分 = Σ(单项分 × 权重)，
/// 达到策略及格线即通过。单项分与总分一并返回，随订单归档。
pub fn evaluate(strategy: &Strategy, scorer: &dyn ConditionScorer) -> StrategyGate {
    let mut condition_scores = BTreeMap::new();
    let mut total = 0.0;

    for condition in &strategy.conditions {
        let score = scorer.score(condition);
        total += score * condition.weight;
        condition_scores.insert(condition.id.clone(), score);
    }

    let total = round2(total);
    StrategyGate {
        pass: total >= strategy.pass_score,
        score: total,
        pass_score: strategy.pass_score,
        condition_scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::Condition;

    fn strategy(pass_score: f64, weights: &[f64]) -> Strategy {
        Strategy {
            id: "s1".to_string(),
            name: "测试策略".to_string(),
            description: String::new(),
            conditions: weights
                .iter()
                .enumerate()
                .map(|(i, w)| Condition {
                    id: format!("c{i}"),
                    name: format!("条件{i}"),
                    weight: *w,
                    threshold: 70.0,
                    description: String::new(),
                })
                .collect(),
            pass_score,
        }
    }

    #[test]
    fn weighted_sum_over_all_conditions() {
        let gate = evaluate(&strategy(70.0, &[0.3, 0.3, 0.4]), &FixedScorer(80.0));
        assert_eq!(gate.score, 80.0);
        assert!(gate.pass);
        assert_eq!(gate.condition_scores.len(), 3);
        assert_eq!(gate.condition_scores["c0"], 80.0);
    }

    #[test]
    fn exact_pass_score_passes() {
        let gate = evaluate(&strategy(70.0, &[0.5, 0.5]), &FixedScorer(70.0));
        assert_eq!(gate.score, 70.0);
        assert!(gate.pass);
    }

    #[test]
    fn below_pass_score_fails() {
        let gate = evaluate(&strategy(70.0, &[0.6, 0.4]), &FixedScorer(69.0));
        assert!(!gate.pass);
        assert_eq!(gate.pass_score, 70.0);
    }

    #[test]
    fn random_scorer_stays_in_band() {
        let strategy = strategy(0.0, &[1.0]);
        for _ in 0..100 {
            let gate = evaluate(&strategy, &RandomScorer);
            assert!(gate.score >= 70.0 && gate.score < 100.0, "score {}", gate.score);
        }
    }
}
