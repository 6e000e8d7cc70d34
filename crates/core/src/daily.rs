use crate::enums::{MarketSentiment, SessionAction, TrendOutlook};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 每日功课记录 (Daily Work Record)
///
/// 盘后手工维护的市场指标快照，按日期唯一。指数、涨跌、资金面等数值列
/// 允许缺省 (当天没抄到就空着)；情绪、展望、操作三列为必填枚举。
/// 与 26 列表格的对应关系见 journal-storage 的 spreadsheet 模块。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkRecord {
    pub id: String,

    /// 日期 (唯一键)
    pub date: NaiveDate,

    /// 上证指数收盘点位
    pub sh_index: Option<Decimal>,
    /// 上证涨跌幅 (%)
    pub sh_change_pct: Option<Decimal>,
    pub sz_index: Option<Decimal>,
    pub sz_change_pct: Option<Decimal>,
    pub chinext_index: Option<Decimal>,
    pub chinext_change_pct: Option<Decimal>,
    pub hsi_index: Option<Decimal>,
    pub nasdaq_index: Option<Decimal>,
    pub sp500_index: Option<Decimal>,

    /// 上涨家数
    pub advancers: Option<u32>,
    /// 下跌家数
    pub decliners: Option<u32>,
    pub limit_up_count: Option<u32>,
    pub limit_down_count: Option<u32>,

    /// 两市成交额 (亿元)
    pub turnover: Option<Decimal>,
    /// 北向资金净流入 (亿元，可为负)
    pub northbound_flow: Option<Decimal>,
    /// 融资余额 (亿元)
    pub margin_balance: Option<Decimal>,

    pub dollar_index: Option<Decimal>,
    /// 恐慌指数 VIX
    pub vix: Option<Decimal>,
    pub gold_price: Option<Decimal>,
    pub crude_oil_price: Option<Decimal>,

    /// 当日市场情绪
    pub market_sentiment: MarketSentiment,
    /// 明日走势展望
    pub next_day_outlook: TrendOutlook,
    /// 当日是否实际操作
    pub session_action: SessionAction,

    /// 热点板块 (自由文本)
    pub hot_sectors: Option<String>,
    /// 复盘笔记 (自由文本)
    pub review_notes: Option<String>,
}

impl DailyWorkRecord {
    /// 只填必填列的空白记录，数值与文本列留待逐项补充
    pub fn new(
        date: NaiveDate,
        market_sentiment: MarketSentiment,
        next_day_outlook: TrendOutlook,
        session_action: SessionAction,
    ) -> Self {
        Self {
            id: String::new(),
            date,
            sh_index: None,
            sh_change_pct: None,
            sz_index: None,
            sz_change_pct: None,
            chinext_index: None,
            chinext_change_pct: None,
            hsi_index: None,
            nasdaq_index: None,
            sp500_index: None,
            advancers: None,
            decliners: None,
            limit_up_count: None,
            limit_down_count: None,
            turnover: None,
            northbound_flow: None,
            margin_balance: None,
            dollar_index: None,
            vix: None,
            gold_price: None,
            crude_oil_price: None,
            market_sentiment,
            next_day_outlook,
            session_action,
            hot_sectors: None,
            review_notes: None,
        }
    }
}
