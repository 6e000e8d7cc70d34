use crate::enums::Side;
use serde::{Deserialize, Serialize};

/// 策略条件 (Condition)
///
/// 归属权独占于所在策略；同一策略内全部条件的权重之和约定不超过 1.0，
/// 由界面层把关，存储层不强制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,

    /// 条件名称，如 "价格突破"
    pub name: String,

    /// 权重 [0, 1]
    pub weight: f64,

    /// 提示性阈值 [0, 100]。当前的占位打分实现未使用，留给真实信号评估接入。
    pub threshold: f64,

    pub description: String,
}

/// 交易策略 (Strategy)
///
/// 按买卖方向分属两套独立目录。创建预约单时必须选定一条策略，
/// 其条件逐项打分、按权重汇总，总分达到及格线才放行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,

    pub name: String,

    pub description: String,

    /// 有序条件列表
    pub conditions: Vec<Condition>,

    /// 及格线：条件加权总分达到该值才算通过
    pub pass_score: f64,
}

/// 买卖两侧的策略目录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyBook {
    pub buy: Vec<Strategy>,
    pub sell: Vec<Strategy>,
}

impl StrategyBook {
    pub fn side(&self, side: Side) -> &[Strategy] {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Vec<Strategy> {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    pub fn find(&self, side: Side, id: &str) -> Option<&Strategy> {
        self.side(side).iter().find(|s| s.id == id)
    }
}
