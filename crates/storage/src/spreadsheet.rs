//! 每日功课的表格导入导出。
//!
//! 26 列，表头为中文标签，按表头文本匹配列 (顺序无关，认不出的列忽略)；
//! 日期列为唯一键。导入走"合法行收下、问题行出报告"的部分成功策略，
//! 错误报告可再导出成表格供用户下载修正。

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use journal_core::{
    DailyWorkRecord, JournalError, MarketSentiment, SessionAction, TrendOutlook,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// 日期列使用的规范格式 (导出同样按此格式写出，保证来回一致)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 26 个表头标签，导出按此顺序写列
pub const HEADERS: [&str; 26] = [
    "日期",
    "上证指数",
    "上证涨跌幅",
    "深证成指",
    "深证涨跌幅",
    "创业板指",
    "创业板涨跌幅",
    "恒生指数",
    "纳斯达克指数",
    "标普500",
    "上涨家数",
    "下跌家数",
    "涨停家数",
    "跌停家数",
    "两市成交额",
    "北向资金",
    "融资余额",
    "美元指数",
    "恐慌指数",
    "黄金价格",
    "原油价格",
    "市场情绪",
    "明日展望",
    "当日操作",
    "热点板块",
    "复盘笔记",
];

/// 必填列：缺任何一个整份文件拒收
const REQUIRED_HEADERS: [&str; 4] = ["日期", "市场情绪", "明日展望", "当日操作"];

/// 单行的拒收记录
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// 文件行号 (表头占第 1 行，数据从第 2 行起)
    pub line: usize,
    /// 行内日期原文 (可能为空或非法)
    pub date: String,
    /// 该行的全部问题
    pub reasons: Vec<String>,
}

/// 解析结果：合法行与问题行各归各
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub accepted: Vec<DailyWorkRecord>,
    pub rejected: Vec<RowError>,
}

/// 解析并校验一份表格。
///
/// 合法行构造成记录返回；任何一项校验不过的行整行进报告，
/// 与存量或批内撞日期的行无论其余字段多干净一律拒收。
pub fn import(
    reader: impl Read,
    existing_dates: &HashSet<NaiveDate>,
) -> Result<ImportOutcome, JournalError> {
    // Excel 导出的 CSV 常带 UTF-8 BOM，先剥掉
    let mut raw = String::new();
    let mut reader = reader;
    reader.read_to_string(&mut raw)?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| JournalError::SpreadsheetError(e.to_string()))?
        .clone();
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| (h.to_string(), idx))
        .collect();
    for required in REQUIRED_HEADERS {
        if !columns.contains_key(required) {
            return Err(JournalError::SpreadsheetError(format!(
                "缺少必填列: {required}"
            )));
        }
    }

    let mut outcome = ImportOutcome::default();
    let mut seen: HashSet<NaiveDate> = existing_dates.clone();

    for (row_idx, result) in rdr.records().enumerate() {
        let line = row_idx + 2; // 表头占第 1 行
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                outcome.rejected.push(RowError {
                    line,
                    date: String::new(),
                    reasons: vec![format!("行解析失败: {e}")],
                });
                continue;
            }
        };
        let field = |name| cell(&columns, &record, name);

        let mut reasons = Vec::new();

        // 日期：必填 + 规范格式 + 不得重复
        let raw_date = field("日期").to_string();
        let date = if raw_date.is_empty() {
            reasons.push("日期不能为空".to_string());
            None
        } else {
            match NaiveDate::parse_from_str(&raw_date, DATE_FORMAT) {
                Ok(d) => Some(d),
                Err(_) => {
                    reasons.push(format!("日期格式应为 YYYY-MM-DD: {raw_date}"));
                    None
                }
            }
        };
        if let Some(d) = date {
            if seen.contains(&d) {
                reasons.push(format!("日期重复: {d}"));
            }
        }

        // 枚举列：必填 + 取值合法
        let sentiment = parse_enum::<MarketSentiment>(field("市场情绪"), "市场情绪", &mut reasons);
        let outlook = parse_enum::<TrendOutlook>(field("明日展望"), "明日展望", &mut reasons);
        let action = parse_enum::<SessionAction>(field("当日操作"), "当日操作", &mut reasons);

        // 数值列：选填，填了就必须可解析
        let sh_index = parse_decimal(field("上证指数"), "上证指数", &mut reasons);
        let sh_change_pct = parse_decimal(field("上证涨跌幅"), "上证涨跌幅", &mut reasons);
        let sz_index = parse_decimal(field("深证成指"), "深证成指", &mut reasons);
        let sz_change_pct = parse_decimal(field("深证涨跌幅"), "深证涨跌幅", &mut reasons);
        let chinext_index = parse_decimal(field("创业板指"), "创业板指", &mut reasons);
        let chinext_change_pct =
            parse_decimal(field("创业板涨跌幅"), "创业板涨跌幅", &mut reasons);
        let hsi_index = parse_decimal(field("恒生指数"), "恒生指数", &mut reasons);
        let nasdaq_index = parse_decimal(field("纳斯达克指数"), "纳斯达克指数", &mut reasons);
        let sp500_index = parse_decimal(field("标普500"), "标普500", &mut reasons);
        let advancers = parse_count(field("上涨家数"), "上涨家数", &mut reasons);
        let decliners = parse_count(field("下跌家数"), "下跌家数", &mut reasons);
        let limit_up_count = parse_count(field("涨停家数"), "涨停家数", &mut reasons);
        let limit_down_count = parse_count(field("跌停家数"), "跌停家数", &mut reasons);
        let turnover = parse_decimal(field("两市成交额"), "两市成交额", &mut reasons);
        let northbound_flow = parse_decimal(field("北向资金"), "北向资金", &mut reasons);
        let margin_balance = parse_decimal(field("融资余额"), "融资余额", &mut reasons);
        let dollar_index = parse_decimal(field("美元指数"), "美元指数", &mut reasons);
        let vix = parse_decimal(field("恐慌指数"), "恐慌指数", &mut reasons);
        let gold_price = parse_decimal(field("黄金价格"), "黄金价格", &mut reasons);
        let crude_oil_price = parse_decimal(field("原油价格"), "原油价格", &mut reasons);

        let hot_sectors = optional_text(field("热点板块"));
        let review_notes = optional_text(field("复盘笔记"));

        match (date, sentiment, outlook, action) {
            (Some(date), Some(market_sentiment), Some(next_day_outlook), Some(session_action))
                if reasons.is_empty() =>
            {
                seen.insert(date);
                outcome.accepted.push(DailyWorkRecord {
                    id: Uuid::new_v4().to_string(),
                    date,
                    sh_index,
                    sh_change_pct,
                    sz_index,
                    sz_change_pct,
                    chinext_index,
                    chinext_change_pct,
                    hsi_index,
                    nasdaq_index,
                    sp500_index,
                    advancers,
                    decliners,
                    limit_up_count,
                    limit_down_count,
                    turnover,
                    northbound_flow,
                    margin_balance,
                    dollar_index,
                    vix,
                    gold_price,
                    crude_oil_price,
                    market_sentiment,
                    next_day_outlook,
                    session_action,
                    hot_sectors,
                    review_notes,
                });
            }
            _ => outcome.rejected.push(RowError {
                line,
                date: raw_date,
                reasons,
            }),
        }
    }

    Ok(outcome)
}

/// 导出全部功课记录 (按日期倒序，26 列与导入表头一致)
pub fn export(writer: impl Write, records: &[DailyWorkRecord]) -> Result<(), JournalError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS).map_err(csv_err)?;

    let mut sorted: Vec<&DailyWorkRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    for r in sorted {
        wtr.write_record(&[
            r.date.format(DATE_FORMAT).to_string(),
            format_decimal(r.sh_index),
            format_decimal(r.sh_change_pct),
            format_decimal(r.sz_index),
            format_decimal(r.sz_change_pct),
            format_decimal(r.chinext_index),
            format_decimal(r.chinext_change_pct),
            format_decimal(r.hsi_index),
            format_decimal(r.nasdaq_index),
            format_decimal(r.sp500_index),
            format_count(r.advancers),
            format_count(r.decliners),
            format_count(r.limit_up_count),
            format_count(r.limit_down_count),
            format_decimal(r.turnover),
            format_decimal(r.northbound_flow),
            format_decimal(r.margin_balance),
            format_decimal(r.dollar_index),
            format_decimal(r.vix),
            format_decimal(r.gold_price),
            format_decimal(r.crude_oil_price),
            r.market_sentiment.to_string(),
            r.next_day_outlook.to_string(),
            r.session_action.to_string(),
            r.hot_sectors.clone().unwrap_or_default(),
            r.review_notes.clone().unwrap_or_default(),
        ])
        .map_err(csv_err)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出错误报告 (问题行清单)，供用户下载修正后重新导入
pub fn export_error_report(
    writer: impl Write,
    errors: &[RowError],
) -> Result<(), JournalError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["行号", "日期", "错误原因"]).map_err(csv_err)?;
    for e in errors {
        wtr.write_record(&[e.line.to_string(), e.date.clone(), e.reasons.join("；")])
            .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

// =========================================================================
// 单字段解析
// =========================================================================

/// 按表头名取单元格内容，列不存在或行太短都按空串处理
fn cell<'a>(
    columns: &HashMap<String, usize>,
    record: &'a csv::StringRecord,
    name: &str,
) -> &'a str {
    columns.get(name).and_then(|&i| record.get(i)).unwrap_or("")
}

fn parse_enum<T: FromStr>(raw: &str, label: &str, reasons: &mut Vec<String>) -> Option<T> {
    if raw.is_empty() {
        reasons.push(format!("{label}不能为空"));
        return None;
    }
    match T::from_str(raw) {
        Ok(v) => Some(v),
        Err(_) => {
            reasons.push(format!("{label}取值非法: {raw}"));
            None
        }
    }
}

fn parse_decimal(raw: &str, label: &str, reasons: &mut Vec<String>) -> Option<Decimal> {
    if raw.is_empty() {
        return None; // 选填
    }
    match Decimal::from_str(raw) {
        Ok(v) => Some(v),
        Err(_) => {
            reasons.push(format!("{label}应为数值: {raw}"));
            None
        }
    }
}

fn parse_count(raw: &str, label: &str, reasons: &mut Vec<String>) -> Option<u32> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            reasons.push(format!("{label}应为非负整数: {raw}"));
            None
        }
    }
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn format_decimal(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_count(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_err(e: csv::Error) -> JournalError {
    JournalError::SpreadsheetError(e.to_string())
}
