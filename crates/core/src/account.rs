use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 账户实体 (Account)
///
/// 单例记录：整个日志系统只有一份账户快照。
/// 余额随手工账单与预约单执行变动；不设下限校验，透支也如实入账，余额可以为负。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// 当前现金余额
    pub balance: Decimal,

    /// 累计投入本金
    pub total_invested: Decimal,

    /// 累计已实现盈亏
    pub total_profit: Decimal,
}

impl Account {
    /// 余额加减 (delta 可为负)
    pub fn apply(&mut self, delta: Decimal) {
        self.balance += delta;
    }
}
