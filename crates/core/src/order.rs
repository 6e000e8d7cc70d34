use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{OrderStatus, Side};
use crate::primitive::Price;

// =========================================================================
// 评估门结果 (三关评估的留档明细)
// =========================================================================

/// 心理关：取最近一次心理测试的结论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologicalGate {
    pub pass: bool,
    pub score: f64,
}

/// 策略关：条件逐项打分后的加权汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyGate {
    pub pass: bool,
    /// 条件加权总分，两位小数
    pub score: f64,
    /// 所选策略的及格线
    pub pass_score: f64,
    /// 条件 id -> 单项得分
    pub condition_scores: BTreeMap<String, f64>,
}

/// 风控关 (仅买入流程)：咨询性质的建议仓位，必然放行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskGate {
    pub pass: bool,
    /// 按模型允许的单笔最大亏损额
    pub max_loss: Decimal,
    /// 由止损距离反推的最大可买股数
    pub max_quantity: u64,
    pub risk_model_id: String,
}

/// 三关评估结果汇总，随订单归档供复盘
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub psychological: Option<PsychologicalGate>,
    pub strategy: Option<StrategyGate>,
    /// 卖出流程跳过风控关，保持 None
    pub risk: Option<RiskGate>,
}

// =========================================================================
// 预约单 (Reservation Order)
// =========================================================================

/// 预约单实体
///
/// 必须依次通过心理、策略、风控三关评估才能创建，创建即 pending。
/// 执行是单向跃迁：订单转 executed 的同时落一笔交易记录、一笔账单，
/// 并按同一现金流变动账户余额；取消同样是单向终态，不产生账务。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 业务唯一标识 (UUID)
    pub id: String,

    /// 资产代码，如 "AAPL"
    pub symbol: String,

    /// 资产名称
    pub name: String,

    /// 买卖方向
    pub side: Side,

    /// 委托价格
    pub price: Price,

    /// 止损价 (买入必填)
    pub stop_loss_price: Option<Price>,

    /// 止盈价 (可选)
    pub take_profit_price: Option<Price>,

    /// 委托股数
    pub quantity: u32,

    /// 采用的策略 id
    pub strategy_id: String,

    /// 采用的风险模型 id (卖出流程为 None)
    pub risk_model_id: Option<String>,

    pub psychological_score: f64,

    pub strategy_score: f64,

    /// 风控关为咨询性质，恒为满分 100
    pub risk_score: f64,

    /// 综合评分 = 心理×0.3 + 策略×0.4 + 风控×0.3
    pub overall_score: f64,

    pub status: OrderStatus,

    /// 三关评估明细，随单归档
    #[serde(rename = "evaluationResults")]
    pub evaluation: EvaluationReport,

    pub created_at: DateTime<Utc>,

    pub executed_at: Option<DateTime<Utc>>,

    pub cancelled_at: Option<DateTime<Utc>>,
}

/// 创建预约单的输入 (id、状态与创建时间由存储层分配)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub symbol: String,
    pub name: String,
    pub side: Side,
    pub price: Price,
    pub stop_loss_price: Option<Price>,
    pub take_profit_price: Option<Price>,
    pub quantity: u32,
    pub strategy_id: String,
    pub risk_model_id: Option<String>,
    pub psychological_score: f64,
    pub strategy_score: f64,
    pub risk_score: f64,
    pub overall_score: f64,
    pub evaluation: EvaluationReport,
}

impl Order {
    /// 由草稿落成 pending 订单
    pub fn from_draft(id: String, draft: OrderDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            symbol: draft.symbol,
            name: draft.name,
            side: draft.side,
            price: draft.price,
            stop_loss_price: draft.stop_loss_price,
            take_profit_price: draft.take_profit_price,
            quantity: draft.quantity,
            strategy_id: draft.strategy_id,
            risk_model_id: draft.risk_model_id,
            psychological_score: draft.psychological_score,
            strategy_score: draft.strategy_score,
            risk_score: draft.risk_score,
            overall_score: draft.overall_score,
            status: OrderStatus::Pending,
            evaluation: draft.evaluation,
            created_at,
            executed_at: None,
            cancelled_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// 成交总额 (价格 × 股数，无符号)
    pub fn amount(&self) -> Decimal {
        self.price * self.quantity
    }
}
