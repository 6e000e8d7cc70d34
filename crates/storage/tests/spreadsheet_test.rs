use journal_storage::{spreadsheet, JournalStore, NullStore};
use rust_decimal_macros::dec;

fn open_store() -> JournalStore {
    JournalStore::open(Box::new(NullStore)).expect("open in-memory store")
}

/// 26 列的合法数据行 (列序与导出表头一致)
fn full_row(date: &str) -> String {
    format!(
        "{date},3050.5,0.64,9500.1,-0.2,1850.3,1.1,16500,16000.5,5100.2,\
         2800,2100,45,12,8900,52.3,15800,104.2,14.5,2150.8,82.4,\
         乐观,看多,已操作,AI算力,缩量反弹"
    )
}

fn header_row() -> String {
    spreadsheet::HEADERS.join(",")
}

fn sheet(rows: &[String]) -> String {
    let mut text = header_row();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

// =========================================================================
// 导入
// =========================================================================

#[test]
fn import_accepts_valid_rows_and_reports_invalid_ones() {
    let mut store = open_store();
    let csv = sheet(&[
        full_row("2024-03-01"),
        full_row("2024-03-04"),
        // 枚举取值非法
        full_row("2024-03-05").replace("乐观", "无所谓"),
        full_row("2024-03-06"),
        // 日期格式非法
        full_row("03/07/2024"),
    ]);

    let report = store.import_spreadsheet(csv.as_bytes()).unwrap();

    assert_eq!(report.imported, 3);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(store.daily_work().len(), 3);

    // 行号：表头第 1 行，问题行在第 4、6 行
    assert_eq!(report.rejected[0].line, 4);
    assert!(report.rejected[0].reasons[0].contains("市场情绪"));
    assert_eq!(report.rejected[1].line, 6);
    assert!(report.rejected[1].reasons[0].contains("日期格式"));
}

#[test]
fn duplicate_dates_are_always_rejected() {
    let mut store = open_store();
    store
        .import_spreadsheet(sheet(&[full_row("2024-03-01")]).as_bytes())
        .unwrap();

    // 与存量撞日期 + 批内撞日期：字段再干净也拒收
    let report = store
        .import_spreadsheet(
            sheet(&[
                full_row("2024-03-01"),
                full_row("2024-03-04"),
                full_row("2024-03-04"),
            ])
            .as_bytes(),
        )
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.rejected.len(), 2);
    assert!(report.rejected.iter().all(|r| r.reasons.iter().any(|m| m.contains("日期重复"))));
    assert_eq!(store.daily_work().len(), 2);
}

#[test]
fn missing_required_header_rejects_whole_file() {
    let mut store = open_store();
    let headers: Vec<&str> = spreadsheet::HEADERS
        .iter()
        .copied()
        .filter(|h| *h != "当日操作")
        .collect();
    let csv = headers.join(",");

    assert!(store.import_spreadsheet(csv.as_bytes()).is_err());
}

#[test]
fn bom_and_column_order_are_tolerated() {
    let mut store = open_store();
    // 只给必填四列，且列序打乱，再带上 BOM
    let csv = "\u{feff}市场情绪,日期,当日操作,明日展望\n悲观,2024-03-01,观望,看空";

    let report = store.import_spreadsheet(csv.as_bytes()).unwrap();
    assert_eq!(report.imported, 1);
    assert!(report.rejected.is_empty());

    let record = &store.daily_work()[0];
    assert_eq!(record.date.to_string(), "2024-03-01");
    assert!(record.sh_index.is_none());
}

#[test]
fn invalid_numeric_cell_rejects_the_row() {
    let mut store = open_store();
    let csv = sheet(&[full_row("2024-03-01").replace("3050.5", "三千点")]);

    let report = store.import_spreadsheet(csv.as_bytes()).unwrap();
    assert_eq!(report.imported, 0);
    assert!(report.rejected[0].reasons[0].contains("上证指数"));
}

// =========================================================================
// 导出与来回一致性
// =========================================================================

#[test]
fn export_orders_rows_by_date_descending() {
    let mut store = open_store();
    store
        .import_spreadsheet(sheet(&[full_row("2024-03-01"), full_row("2024-03-05")]).as_bytes())
        .unwrap();

    let mut buffer = Vec::new();
    store.export_spreadsheet(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], spreadsheet::HEADERS.join(","));
    assert!(lines[1].starts_with("2024-03-05"));
    assert!(lines[2].starts_with("2024-03-01"));
}

#[test]
fn export_then_reimport_reproduces_every_field() {
    let mut store = open_store();
    store
        .import_spreadsheet(sheet(&[full_row("2024-03-01"), full_row("2024-03-05")]).as_bytes())
        .unwrap();

    let mut buffer = Vec::new();
    store.export_spreadsheet(&mut buffer).unwrap();

    // 清空后重导入
    let mut fresh = open_store();
    let report = fresh.import_spreadsheet(buffer.as_slice()).unwrap();
    assert_eq!(report.imported, 2);
    assert!(report.rejected.is_empty());

    let mut exported: Vec<_> = store.daily_work().to_vec();
    let mut reimported: Vec<_> = fresh.daily_work().to_vec();
    exported.sort_by_key(|r| r.date);
    reimported.sort_by_key(|r| r.date);
    for (a, b) in exported.iter_mut().zip(reimported.iter_mut()) {
        // id 由导入重新分配，字段值必须逐一还原
        b.id = a.id.clone();
        assert_eq!(a, b);
    }
}

#[test]
fn error_report_lists_rejected_rows() {
    let mut store = open_store();
    let report = store
        .import_spreadsheet(sheet(&[full_row("bad-date")]).as_bytes())
        .unwrap();
    assert_eq!(report.rejected.len(), 1);

    let mut buffer = Vec::new();
    spreadsheet::export_error_report(&mut buffer, &report.rejected).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.lines().next().unwrap().contains("行号"));
    assert!(text.contains("bad-date"));
    assert!(text.contains("日期格式"));
}

#[test]
fn imported_values_parse_into_typed_fields() {
    let mut store = open_store();
    store
        .import_spreadsheet(sheet(&[full_row("2024-03-01")]).as_bytes())
        .unwrap();

    let record = &store.daily_work()[0];
    assert_eq!(record.sh_index, Some(dec!(3050.5)));
    assert_eq!(record.advancers, Some(2800));
    assert_eq!(record.limit_down_count, Some(12));
    assert_eq!(record.hot_sectors.as_deref(), Some("AI算力"));
}
