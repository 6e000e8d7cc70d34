use serde::{Deserialize, Serialize};

/// 风险模型 (Risk Model)
///
/// 一条命名的风控策略：约束单笔交易允许亏掉的资金比例，
/// 并据此反推建议仓位上限。可增删的目录数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskModel {
    pub id: String,

    /// 模型名称，如 "保守型"
    pub name: String,

    pub description: String,

    /// 单笔最大亏损占总资金的百分比 (1 表示 1%)
    pub max_loss_percent: f64,

    /// 建议仓位占比 (0, 1]
    pub position_size: f64,
}
