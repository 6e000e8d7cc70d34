// crates/core/src/enums.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")] // 序列化为 "buy", "sell"，与快照布局一致
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// 账单与报表上使用的中文标签
    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "买入",
            Side::Sell => "卖出",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending, // 已创建，等待执行
    Executed,  // 已执行 (终态)
    Cancelled, // 已取消 (终态)，不产生任何账务
}

/// 账单类型。入账/出账为手工流水，买入/卖出只能由订单执行落账。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TransactionKind {
    #[serde(rename = "入账")]
    #[strum(serialize = "入账")]
    Deposit,
    #[serde(rename = "出账")]
    #[strum(serialize = "出账")]
    Withdrawal,
    #[serde(rename = "买入")]
    #[strum(serialize = "买入")]
    Buy,
    #[serde(rename = "卖出")]
    #[strum(serialize = "卖出")]
    Sell,
}

impl TransactionKind {
    /// 是否为手工录入的出入金类型
    pub fn is_manual(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Withdrawal)
    }
}

// =========================================================================
// 每日功课的枚举列 (表格按中文标签匹配取值)
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum MarketSentiment {
    #[serde(rename = "乐观")]
    #[strum(serialize = "乐观")]
    Optimistic,
    #[serde(rename = "中性")]
    #[strum(serialize = "中性")]
    Neutral,
    #[serde(rename = "悲观")]
    #[strum(serialize = "悲观")]
    Pessimistic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TrendOutlook {
    #[serde(rename = "看多")]
    #[strum(serialize = "看多")]
    Bullish,
    #[serde(rename = "震荡")]
    #[strum(serialize = "震荡")]
    Sideways,
    #[serde(rename = "看空")]
    #[strum(serialize = "看空")]
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum SessionAction {
    #[serde(rename = "已操作")]
    #[strum(serialize = "已操作")]
    Traded,
    #[serde(rename = "观望")]
    #[strum(serialize = "观望")]
    Watching,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn enum_labels_round_trip() {
        assert_eq!(MarketSentiment::from_str("乐观").unwrap(), MarketSentiment::Optimistic);
        assert_eq!(MarketSentiment::Neutral.to_string(), "中性");
        assert_eq!(TrendOutlook::from_str("震荡").unwrap(), TrendOutlook::Sideways);
        assert_eq!(SessionAction::from_str("观望").unwrap(), SessionAction::Watching);
        assert!(MarketSentiment::from_str("无所谓").is_err());
    }

    #[test]
    fn side_labels() {
        assert_eq!(Side::Buy.label(), "买入");
        assert_eq!(Side::Sell.label(), "卖出");
    }
}
