use anyhow::Context;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use tokio::signal;
use tracing::{info, warn};

use journal_storage::{JournalStore, LocalFileStore};

// =========================================================================
// 1. 日志配置 (输出到控制台 + 文件)
// =========================================================================
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // 1. 文件输出器：每天生成一个新的日志文件 (logs/journal.2025-xx-xx.log)
    let file_appender = tracing_appender::rolling::daily("logs", "journal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 2. 控制台层 (Console Layer)
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false) // 不显示模块路径，保持清爽
        .with_thread_ids(true)
        .compact(); // 紧凑模式

    // 3. 文件层 (File Layer)
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // 文件里不要颜色代码
        .with_file(true)
        .with_line_number(true);

    // 4. 注册全局订阅者
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard // 必须返回 guard，否则日志线程会立即销毁
}

// =========================================================================
// 2. 总览播报 (余额 / 交易次数 / 胜率 / 待执行单 / 最近心理测试)
// =========================================================================
fn report_overview(store: &JournalStore) {
    let account = store.account();
    let executed = store.executed_orders().count();
    let pending = store.pending_orders().count();

    // 胜率按交易记录的盈亏标注统计，未回填的按未分胜负计
    let trades = store.trade_records();
    let wins = trades.iter().filter(|t| t.profit > Decimal::ZERO).count();
    let win_rate = if trades.is_empty() {
        0
    } else {
        wins * 100 / trades.len()
    };

    let latest_test = store.latest_psychological_test().map(|t| t.overall_score);

    info!(
        balance = %account.balance,
        executed_orders = executed,
        pending_orders = pending,
        win_rate_pct = win_rate,
        latest_test_score = ?latest_test,
        "账户总览"
    );
}

async fn run_overview_loop(store: JournalStore, interval_secs: u64) {
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    loop {
        ticker.tick().await;
        report_overview(&store);
    }
}

// =========================================================================
// 3. 主入口 (Main Entry)
// =========================================================================
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A. 加载配置与日志
    dotenv().ok(); // 读取 .env 文件
    let _log_guard = init_logging(); // 初始化日志，_guard 不能丢

    info!("Starting Trading Journal Dashboard 📒");

    // B. 定位数据目录并打开存储 (无快照则按出厂默认初始化)
    let data_dir = env::var("JOURNAL_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let interval_secs: u64 = env::var("JOURNAL_OVERVIEW_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60);

    let persister = LocalFileStore::new(&data_dir)
        .with_context(|| format!("Failed to open data dir: {data_dir}"))?;
    let store =
        JournalStore::open(Box::new(persister)).context("Failed to open journal store")?;
    info!("📦 Journal store ready (data dir: {})", data_dir);

    report_overview(&store);

    // C. 周期播报总览，监听系统信号实现优雅停机
    tokio::select! {
        _ = run_overview_loop(store, interval_secs) => {
            tracing::error!("Overview loop exited unexpectedly!");
        }
        _ = signal::ctrl_c() => {
            warn!("🛑 Ctrl+C received! Shutting down gracefully...");
        }
    }

    info!("👋 Journal Dashboard Shutdown Complete.");
    Ok(())
}
