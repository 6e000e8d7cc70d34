use crate::error::JournalError;
use crate::primitive::round2;
use crate::{ensure_not_empty, ensure_range, ensure_that};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 及格线：综合得分达到 70 分即通过 (边界值 70.00 算通过)
pub const PASS_SCORE: f64 = 70.0;

/// 心理测试指标 (Psychological Indicator)
///
/// 交易前自评问卷的单个维度，如 "睡眠质量"、"情绪状态"。
/// 可增改的目录数据；全部指标的权重之和约定为 1.0，由界面层把关，
/// 计算综合分时会再按实际权重和归一，权重不满 1 也不会压低得分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologicalIndicator {
    pub id: String,

    /// 指标名称
    pub name: String,

    /// 指标说明，展示在问卷上
    pub description: String,

    /// 打分下限 (原始分)
    pub min_score: i32,

    /// 打分上限 (原始分)，必须大于 min_score
    pub max_score: i32,

    /// 权重 [0, 1]
    pub weight: f64,
}

impl PsychologicalIndicator {
    /// 校验指标自身合法性，区间退化与权重越界在此拦截
    pub fn validate(&self) -> Result<(), JournalError> {
        ensure_not_empty!(self.name, "指标名称不能为空");
        ensure_that!(
            self.max_score > self.min_score,
            "指标 {} 的评分区间退化: [{}, {}]",
            self.name,
            self.min_score,
            self.max_score
        );
        ensure_range!(self.weight, 0.0, 1.0, "指标 {} 的权重越界: {}", self.name, self.weight);
        Ok(())
    }
}

/// 心理测试结果 — 追加式日志，记录一次完整自评
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologicalTestResult {
    pub id: String,

    /// 指标 id -> 原始打分
    pub scores: BTreeMap<String, f64>,

    /// 加权归一后的综合得分 [0, 100]，保留两位小数
    pub overall_score: f64,

    /// overall_score >= PASS_SCORE
    pub pass: bool,

    pub date: DateTime<Utc>,
}

/// 计算综合得分。
///
/// 逐指标把原始分归一化到 [0, 100]，按权重加权求和后再除以权重和；
/// 未打分的指标按原始 0 分计入。没有任何有效权重时返回 0。
pub fn overall_score(
    indicators: &[PsychologicalIndicator],
    scores: &BTreeMap<String, f64>,
) -> f64 {
    let mut total = 0.0;
    let mut total_weight = 0.0;

    for indicator in indicators {
        let span = (indicator.max_score - indicator.min_score) as f64;
        if span <= 0.0 {
            // 退化区间在 validate 已拦截，这里兜底跳过
            continue;
        }
        let raw = scores.get(&indicator.id).copied().unwrap_or(0.0);
        let normalized = (raw - indicator.min_score as f64) / span * 100.0;
        total += normalized * indicator.weight;
        total_weight += indicator.weight;
    }

    if total_weight > 0.0 {
        round2(total / total_weight)
    } else {
        0.0
    }
}
