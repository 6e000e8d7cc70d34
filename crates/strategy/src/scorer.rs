use journal_core::Condition;
use rand::Rng;

/// 条件打分器：给单个策略条件一个 [0, 100] 的得分。
///
/// 真实的信号评估 (行情、指标、形态识别) 从这里接入。打分器只看单个条件，
/// 权重汇总由 `evaluate` 负责。
pub trait ConditionScorer {
    fn score(&self, condition: &Condition) -> f64;
}

/// 占位打分器：均匀取 [70, 100) 的整数分。
///
/// TODO: 接入真实信号评估后替换，条件的 threshold 字段即为此预留。
pub struct RandomScorer;

impl ConditionScorer for RandomScorer {
    fn score(&self, _condition: &Condition) -> f64 {
        rand::thread_rng().gen_range(70..100) as f64
    }
}

/// 固定分打分器：回放与测试用。
pub struct FixedScorer(pub f64);

impl ConditionScorer for FixedScorer {
    fn score(&self, _condition: &Condition) -> f64 {
        self.0
    }
}
