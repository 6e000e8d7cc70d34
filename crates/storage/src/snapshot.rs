use journal_core::{
    Account, DailyWorkRecord, JournalError, Order, PsychologicalIndicator,
    PsychologicalTestResult, RiskModel, StrategyBook, TradeRecord, Transaction,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 快照文件名 (数据目录下的单个 JSON 文件)
pub const SNAPSHOT_FILE: &str = "trading-journal.json";

/// 全量状态快照
///
/// 持久化的就是这一个结构：九个集合一次性序列化为单个 JSON blob。
/// 没有版本字段，结构演进暂不处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    pub account: Account,
    pub daily_work_data: Vec<DailyWorkRecord>,
    pub psychological_indicators: Vec<PsychologicalIndicator>,
    pub psychological_tests: Vec<PsychologicalTestResult>,
    pub strategies: StrategyBook,
    pub risk_models: Vec<RiskModel>,
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
    pub trade_records: Vec<TradeRecord>,
}

/// 快照存取接口：save 全量覆盖，load 可能为空 (首次启动)
pub trait SnapshotStore {
    fn save(&self, snapshot: &JournalSnapshot) -> Result<(), JournalError>;
    fn load(&self) -> Result<Option<JournalSnapshot>, JournalError>;
}

/// 本地文件存储
pub struct LocalFileStore {
    file_path: PathBuf,
}

impl LocalFileStore {
    /// 初始化存储，数据目录不存在则创建
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let root = dir.into();
        if !root.exists() {
            fs::create_dir_all(&root)?;
        }
        Ok(Self {
            file_path: root.join(SNAPSHOT_FILE),
        })
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }
}

impl SnapshotStore for LocalFileStore {
    fn save(&self, snapshot: &JournalSnapshot) -> Result<(), JournalError> {
        // Pretty Print 方便人工核对
        let content = serde_json::to_string_pretty(snapshot)?;

        // 先写临时文件再改名，避免写一半留下残缺快照
        let tmp = self.file_path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.file_path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<JournalSnapshot>, JournalError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)?;
        let snapshot: JournalSnapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }
}

/// 不落盘的空实现：测试与临时会话用
#[derive(Debug, Default)]
pub struct NullStore;

impl SnapshotStore for NullStore {
    fn save(&self, _snapshot: &JournalSnapshot) -> Result<(), JournalError> {
        Ok(())
    }

    fn load(&self) -> Result<Option<JournalSnapshot>, JournalError> {
        Ok(None)
    }
}
