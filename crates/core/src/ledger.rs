use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{Side, TransactionKind};
use crate::primitive::Price;

/// 账单明细 (Transaction)
///
/// 追加式现金流水。amount 带符号：入账/卖出为正，出账/买入为负。
/// balance 是落账瞬间的余额快照，事后绝不回算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    /// 账单类型 (入账 / 出账 / 买入 / 卖出)
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// 关联标的 (手工出入金为 None)
    pub symbol: Option<String>,

    /// 带符号金额
    pub amount: Decimal,

    pub description: Option<String>,

    /// 落账后的余额快照
    pub balance: Decimal,

    pub created_at: DateTime<Utc>,
}

/// 交易记录 (Trade Record)
///
/// 与订单执行同一笔状态跃迁落库，三项评分随单带入。
/// profit 默认 0，平仓后由用户手工回填 —— 纯复盘标注，不触碰账户余额。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub side: Side,

    pub symbol: String,

    pub price: Price,

    pub quantity: u32,

    /// 成交总额 (价格 × 股数，无符号)
    pub amount: Decimal,

    pub psychological_score: f64,

    pub strategy_score: f64,

    pub risk_score: f64,

    pub overall_score: f64,

    pub executed_at: DateTime<Utc>,

    /// 已实现盈亏标注 (可事后修改)
    pub profit: Decimal,
}
