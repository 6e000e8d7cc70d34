//! 出厂默认数据：首次启动与一键重置时使用。
//!
//! 目录类集合 (指标 / 策略 / 风险模型) 带默认内容，日志类集合一律为空。

use crate::snapshot::JournalSnapshot;
use journal_core::{
    Account, Condition, PsychologicalIndicator, RiskModel, Strategy, StrategyBook,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 初始账户：十万本金，未投入、未盈利
pub fn initial_account() -> Account {
    Account {
        balance: dec!(100000),
        total_invested: Decimal::ZERO,
        total_profit: Decimal::ZERO,
    }
}

/// 六个默认心理指标，权重之和恰为 1.0
pub fn initial_indicators() -> Vec<PsychologicalIndicator> {
    vec![
        indicator("1", "睡眠质量", "昨晚睡眠时长和质量", 0.15),
        indicator("2", "情绪状态", "当前情绪稳定性", 0.2),
        indicator("3", "压力水平", "当前工作生活压力", 0.15),
        indicator("4", "市场关注度", "对市场信息的关注度", 0.1),
        indicator("5", "风险承受意愿", "当前风险承受能力", 0.2),
        indicator("6", "决策信心", "对当前决策的信心程度", 0.2),
    ]
}

/// 买卖两侧的默认策略模板，及格线统一 70 分
pub fn initial_strategies() -> StrategyBook {
    StrategyBook {
        buy: vec![
            strategy(
                "1",
                "趋势突破策略",
                "价格突破关键阻力位",
                vec![
                    condition("1", "价格突破", 0.3, "价格突破关键位置"),
                    condition("2", "成交量配合", 0.3, "成交量放大"),
                    condition("3", "技术指标", 0.4, "RSI、MACD等指标确认"),
                ],
            ),
            strategy(
                "2",
                "回调买入策略",
                "价格回调至支撑位买入",
                vec![
                    condition("1", "回调位置", 0.4, "回调至支撑位"),
                    condition("2", "支撑有效性", 0.3, "支撑位有效"),
                    condition("3", "买入信号", 0.3, "出现买入信号"),
                ],
            ),
        ],
        sell: vec![
            strategy(
                "1",
                "止盈策略",
                "达到预期盈利目标",
                vec![
                    condition("1", "盈利比例", 0.5, "达到目标盈利比例"),
                    condition("2", "市场环境", 0.3, "市场环境良好"),
                    condition("3", "技术信号", 0.2, "技术指标确认"),
                ],
            ),
            strategy(
                "2",
                "止损策略",
                "跌破止损位及时止损",
                vec![
                    condition("1", "跌破止损", 0.6, "价格触及止损位"),
                    condition("2", "市场趋势", 0.4, "趋势转变"),
                ],
            ),
        ],
    }
}

/// 三档默认风险模型
pub fn initial_risk_models() -> Vec<RiskModel> {
    vec![
        risk_model("1", "保守型", "单笔最大亏损不超过总资金的1%", 1.0, 0.1),
        risk_model("2", "平衡型", "单笔最大亏损不超过总资金的2%", 2.0, 0.2),
        risk_model("3", "激进型", "单笔最大亏损不超过总资金的5%", 5.0, 0.3),
    ]
}

/// 完整出厂快照
pub fn initial_snapshot() -> JournalSnapshot {
    JournalSnapshot {
        account: initial_account(),
        daily_work_data: Vec::new(),
        psychological_indicators: initial_indicators(),
        psychological_tests: Vec::new(),
        strategies: initial_strategies(),
        risk_models: initial_risk_models(),
        orders: Vec::new(),
        transactions: Vec::new(),
        trade_records: Vec::new(),
    }
}

fn indicator(id: &str, name: &str, description: &str, weight: f64) -> PsychologicalIndicator {
    PsychologicalIndicator {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        min_score: 0,
        max_score: 100,
        weight,
    }
}

fn strategy(id: &str, name: &str, description: &str, conditions: Vec<Condition>) -> Strategy {
    Strategy {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        conditions,
        pass_score: 70.0,
    }
}

fn condition(id: &str, name: &str, weight: f64, description: &str) -> Condition {
    Condition {
        id: id.to_string(),
        name: name.to_string(),
        weight,
        threshold: 70.0,
        description: description.to_string(),
    }
}

fn risk_model(
    id: &str,
    name: &str,
    description: &str,
    max_loss_percent: f64,
    position_size: f64,
) -> RiskModel {
    RiskModel {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        max_loss_percent,
        position_size,
    }
}
